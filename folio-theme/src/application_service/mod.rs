pub mod theme_service;
