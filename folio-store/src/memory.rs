//! In-memory key-value store implementation.

use crate::store::{KeyValueStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory [`KeyValueStore`] backed by a process-local `HashMap`.
/// Clones share the same map, which lets a test hand the "same device
/// storage" to a rebuilt service and simulate a process restart.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    inner: Arc<Mutex<HashMap<String, Value>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        guard.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        guard.remove(key);
        Ok(())
    }
}
