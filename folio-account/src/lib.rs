pub mod application_service;
pub mod domain;
pub mod presentation;

pub use application_service::account_service::{
    AccountError, AccountService, LoginCommand, SignupCommand,
};
pub use domain::user::{Role, User};
