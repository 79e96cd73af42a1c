use crate::domain::media::MediaLocator;
use folio_notify::Notification;

/// Delivers human-readable event descriptions after successful
/// mutations. Best-effort: the engine logs a delivery failure and
/// moves on, it never rolls back the mutation.
pub trait NotificationSink {
    fn deliver(&self, notification: Notification) -> Result<(), NotificationSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationSinkError {
    #[error("delivery error: {0}")]
    Delivery(String),
}

/// Obtains a retrievable locator for uploaded binary content.
///
/// Asset deletion does not go through this port: the registry entry is
/// removed but stored binaries are not reclaimed.
pub trait MediaStorage {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<MediaLocator, MediaStorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStorageError {
    #[error("storage error: {0}")]
    Storage(String),
}
