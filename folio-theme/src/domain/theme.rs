use serde::{Deserialize, Serialize};

/// Brand colors applied to global presentation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: "#7c3aed".to_string(),
            secondary: "#f472b6".to_string(),
            accent: "#f43f5e".to_string(),
        }
    }
}

/// Font families for headings and body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSelection {
    pub heading: String,
    pub body: String,
}

impl Default for FontSelection {
    fn default() -> Self {
        Self {
            heading: "Inter".to_string(),
            body: "Inter".to_string(),
        }
    }
}
