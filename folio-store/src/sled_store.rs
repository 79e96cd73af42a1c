//! Sled-based key-value store implementation.

use crate::store::{KeyValueStore, StoreError};
use serde_json::Value;
use sled::transaction::TransactionResult;
use sled::Db;
use std::path::Path;

const TREE_NAME: &str = "kv";

/// Sled-backed implementation of [`KeyValueStore`].
///
/// Stores JSON values in a single sled tree and flushes after every
/// write, so acknowledged writes survive process restarts.
/// `set_many` runs inside a sled transaction: either all entries land
/// or none do, even across a crash.
pub struct SledKeyValueStore {
    db: Db,
}

impl SledKeyValueStore {
    /// Open or create a sled database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref())
            .map_err(|e| StoreError::Storage(format!("failed to open sled database: {e}")))?;
        Ok(Self { db })
    }

    /// Open with an existing sled database instance.
    pub fn with_db(db: Db) -> Self {
        Self { db }
    }

    fn tree(&self) -> Result<sled::Tree, StoreError> {
        self.db
            .open_tree(TREE_NAME)
            .map_err(|e| StoreError::Storage(format!("failed to open tree: {e}")))
    }

    fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::Storage(format!("failed to flush database: {e}")))?;
        Ok(())
    }
}

impl KeyValueStore for SledKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let tree = self.tree()?;
        match tree
            .get(key.as_bytes())
            .map_err(|e| StoreError::Storage(format!("failed to read key {key}: {e}")))?
        {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let tree = self.tree()?;
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        tree.insert(key.as_bytes(), bytes)
            .map_err(|e| StoreError::Storage(format!("failed to write key {key}: {e}")))?;
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let tree = self.tree()?;
        tree.remove(key.as_bytes())
            .map_err(|e| StoreError::Storage(format!("failed to remove key {key}: {e}")))?;
        self.flush()
    }

    fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), StoreError> {
        let tree = self.tree()?;

        let mut encoded = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let bytes =
                serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
            encoded.push((*key, bytes));
        }

        let result: TransactionResult<(), ()> = tree.transaction(|tx| {
            for (key, bytes) in &encoded {
                tx.insert(key.as_bytes(), bytes.as_slice())?;
            }
            Ok(())
        });
        result.map_err(|e| StoreError::Storage(format!("failed to write batch: {e:?}")))?;

        self.flush()
    }
}
