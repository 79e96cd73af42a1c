//! In-process presentation state applier.

use crate::application_service::theme_service::ThemeApplier;
use crate::domain::theme::{ColorPalette, FontSelection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    dark_mode: bool,
    variables: BTreeMap<String, String>,
}

/// Global presentation state: a dark-mode flag and the CSS custom
/// properties a rendering layer would read. Clones share the same
/// state.
#[derive(Clone, Default)]
pub struct PresentationState {
    inner: Arc<Mutex<Inner>>,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dark_mode(&self) -> bool {
        self.inner.lock().map(|inner| inner.dark_mode).unwrap_or(false)
    }

    /// Current value of a CSS custom property, if one has been applied.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.variables.get(name).cloned())
    }
}

impl ThemeApplier for PresentationState {
    fn apply_mode(&self, dark_mode: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.dark_mode = dark_mode;
        }
    }

    fn apply_colors(&self, colors: &ColorPalette) {
        if let Ok(mut inner) = self.inner.lock() {
            inner
                .variables
                .insert("--color-primary".to_string(), colors.primary.clone());
            inner
                .variables
                .insert("--color-secondary".to_string(), colors.secondary.clone());
            inner
                .variables
                .insert("--color-accent".to_string(), colors.accent.clone());
        }
    }

    fn apply_fonts(&self, fonts: &FontSelection) {
        if let Ok(mut inner) = self.inner.lock() {
            inner
                .variables
                .insert("--font-heading".to_string(), fonts.heading.clone());
            inner
                .variables
                .insert("--font-body".to_string(), fonts.body.clone());
        }
    }
}
