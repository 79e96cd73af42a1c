use serde::{Deserialize, Serialize};

/// A human-readable description of something that happened, delivered
/// to interested subscribers after the fact. Carries no identifiers or
/// payloads; it is presentation text, not a domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_title_and_description() {
        let notification = Notification::new("Draft Created", "Your page has been saved.");
        let json = serde_json::to_value(&notification).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "Draft Created",
                "description": "Your page has been saved."
            })
        );
    }
}
