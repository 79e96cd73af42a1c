use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a media asset. Assigned at upload, immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mints fresh media identifiers, collision-free within the process.
pub trait MediaIdGenerator {
    fn generate(&self) -> MediaId;
}

/// Opaque reference usable to retrieve an asset's binary content.
/// The registry never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaLocator(String);

impl MediaLocator {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An uploaded binary resource. Every field is immutable once set; an
/// asset is only ever created and removed, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    id: MediaId,
    name: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
    locator: MediaLocator,
    #[serde(rename = "uploadedBy")]
    uploaded_by: String,
    #[serde(rename = "uploadedAt")]
    uploaded_at: DateTime<Utc>,
}

impl MediaAsset {
    /// Register an uploaded asset, stamping the uploader and the
    /// current time.
    pub fn new(
        id: MediaId,
        name: String,
        mime_type: String,
        locator: MediaLocator,
        uploaded_by: String,
    ) -> Self {
        Self {
            id,
            name,
            mime_type,
            locator,
            uploaded_by,
            uploaded_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &MediaId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn locator(&self) -> &MediaLocator {
        &self.locator
    }

    pub fn uploaded_by(&self) -> &str {
        &self.uploaded_by
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}
