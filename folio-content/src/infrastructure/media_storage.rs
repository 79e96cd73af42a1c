//! Local filesystem media storage.

use crate::application_service::workflow_service::port::{MediaStorage, MediaStorageError};
use crate::domain::media::MediaLocator;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores uploaded binaries as files under a base directory and hands
/// back the file path as the locator. Files are never removed here;
/// deleting a registry entry leaves its binary behind.
pub struct LocalMediaStorage {
    base_path: PathBuf,
}

impl LocalMediaStorage {
    /// Creates the storage with the specified base path and ensures
    /// the base directory exists.
    pub fn create_with_path(base_path: impl Into<PathBuf>) -> Result<Self, MediaStorageError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                MediaStorageError::Storage(format!(
                    "failed to create base directory {}: {e}",
                    base_path.display()
                ))
            })?;
        }
        Ok(Self { base_path })
    }
}

impl MediaStorage for LocalMediaStorage {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<MediaLocator, MediaStorageError> {
        // keep only the file name component of whatever the caller sent
        let file_name = Path::new(name)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload");
        let path = self
            .base_path
            .join(format!("{}-{}", Uuid::new_v4(), file_name));

        fs::write(&path, bytes).map_err(|e| {
            MediaStorageError::Storage(format!("failed to write {}: {e}", path.display()))
        })?;

        Ok(MediaLocator::new(path.to_string_lossy().into_owned()))
    }
}
