//! Key-value storage port - Abstract interface for durable local storage

use serde_json::Value;

/// Storage of JSON-serializable values under named keys.
///
/// Values survive process restarts when backed by a durable
/// implementation. There are no transactional guarantees across keys
/// unless an implementation overrides [`KeyValueStore::set_many`].
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing an absent key is
    /// not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Store several entries in one call.
    ///
    /// The default implementation writes sequentially: a crash between
    /// two writes leaves the keys mutually inconsistent on restart.
    /// Implementations with an atomic multi-key write should override
    /// this to close that window.
    fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}
