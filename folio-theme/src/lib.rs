pub mod application_service;
pub mod domain;
pub mod infrastructure;

pub use application_service::theme_service::{ThemeApplier, ThemeError, ThemeService};
pub use domain::theme::{ColorPalette, FontSelection};
pub use infrastructure::presentation_state::PresentationState;
