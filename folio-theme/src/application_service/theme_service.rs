use crate::domain::theme::{ColorPalette, FontSelection};
use folio_store::{KeyValueStore, StoreError};
use serde_json::Value;
use std::sync::Mutex;

const MODE_KEY: &str = "theme-mode";
const COLORS_KEY: &str = "theme-colors";
const FONTS_KEY: &str = "theme-fonts";

/// Applies theme configuration to global presentation state.
///
/// Application is a side effect, not a persistence step: it cannot fail
/// and is repeated on startup for whatever configuration was restored.
pub trait ThemeApplier {
    fn apply_mode(&self, dark_mode: bool);
    fn apply_colors(&self, colors: &ColorPalette);
    fn apply_fonts(&self, fonts: &FontSelection);
}

struct ThemeState {
    dark_mode: bool,
    colors: ColorPalette,
    fonts: FontSelection,
}

/// Theming configuration store.
///
/// Each mutation persists its own key, then applies the side effect.
/// Independent of the content workflow engine.
pub struct ThemeService<S, A> {
    store: S,
    applier: A,
    state: Mutex<ThemeState>,
}

impl<S, A> ThemeService<S, A>
where
    S: KeyValueStore,
    A: ThemeApplier,
{
    /// Restore persisted configuration (defaults where absent) and
    /// apply all of it to presentation state.
    pub fn load(store: S, applier: A) -> Result<Self, ThemeError> {
        let dark_mode = match store.get(MODE_KEY).map_err(ThemeError::Storage)? {
            Some(value) => decode(value)?,
            None => false,
        };
        let colors = match store.get(COLORS_KEY).map_err(ThemeError::Storage)? {
            Some(value) => decode(value)?,
            None => ColorPalette::default(),
        };
        let fonts = match store.get(FONTS_KEY).map_err(ThemeError::Storage)? {
            Some(value) => decode(value)?,
            None => FontSelection::default(),
        };

        applier.apply_mode(dark_mode);
        applier.apply_colors(&colors);
        applier.apply_fonts(&fonts);

        Ok(Self {
            store,
            applier,
            state: Mutex::new(ThemeState {
                dark_mode,
                colors,
                fonts,
            }),
        })
    }

    pub fn set_dark_mode(&self, dark_mode: bool) -> Result<(), ThemeError> {
        let mut state = self.lock_state()?;

        self.store
            .set(MODE_KEY, &Value::Bool(dark_mode))
            .map_err(ThemeError::Storage)?;
        state.dark_mode = dark_mode;
        self.applier.apply_mode(dark_mode);
        Ok(())
    }

    /// Flip the dark-mode flag; returns the new value.
    pub fn toggle_dark_mode(&self) -> Result<bool, ThemeError> {
        let mut state = self.lock_state()?;
        let dark_mode = !state.dark_mode;

        self.store
            .set(MODE_KEY, &Value::Bool(dark_mode))
            .map_err(ThemeError::Storage)?;
        state.dark_mode = dark_mode;
        self.applier.apply_mode(dark_mode);
        Ok(dark_mode)
    }

    pub fn set_colors(&self, colors: ColorPalette) -> Result<(), ThemeError> {
        let mut state = self.lock_state()?;

        self.store
            .set(COLORS_KEY, &encode(&colors)?)
            .map_err(ThemeError::Storage)?;
        self.applier.apply_colors(&colors);
        state.colors = colors;
        Ok(())
    }

    pub fn set_fonts(&self, fonts: FontSelection) -> Result<(), ThemeError> {
        let mut state = self.lock_state()?;

        self.store
            .set(FONTS_KEY, &encode(&fonts)?)
            .map_err(ThemeError::Storage)?;
        self.applier.apply_fonts(&fonts);
        state.fonts = fonts;
        Ok(())
    }

    pub fn dark_mode(&self) -> Result<bool, ThemeError> {
        Ok(self.lock_state()?.dark_mode)
    }

    pub fn colors(&self) -> Result<ColorPalette, ThemeError> {
        Ok(self.lock_state()?.colors.clone())
    }

    pub fn fonts(&self) -> Result<FontSelection, ThemeError> {
        Ok(self.lock_state()?.fonts.clone())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, ThemeState>, ThemeError> {
        self.state
            .lock()
            .map_err(|e| ThemeError::LockPoisoned(e.to_string()))
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, ThemeError> {
    serde_json::to_value(value)
        .map_err(|e| ThemeError::Storage(StoreError::Serialization(e.to_string())))
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ThemeError> {
    serde_json::from_value(value)
        .map_err(|e| ThemeError::Storage(StoreError::Serialization(e.to_string())))
}

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("storage error: {0}")]
    Storage(StoreError),
    #[error("theme lock poisoned: {0}")]
    LockPoisoned(String),
}
