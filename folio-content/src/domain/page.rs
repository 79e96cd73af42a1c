use crate::domain::page_id::PageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names the generic payload may never carry. Identity, status
/// and stamps move only through `create` and `publish`.
const RESERVED_FIELDS: [&str; 6] = [
    "id",
    "status",
    "createdBy",
    "createdAt",
    "publishedBy",
    "publishedAt",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Published,
}

#[derive(Debug, PartialEq)]
pub enum PageError {
    AlreadyPublished,
}

/// A content item. Author-supplied fields live in the opaque payload;
/// the engine never inspects them beyond copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    id: PageId,
    status: PageStatus,
    #[serde(rename = "createdBy")]
    created_by: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "publishedBy", default, skip_serializing_if = "Option::is_none")]
    published_by: Option<String>,
    #[serde(rename = "publishedAt", default, skip_serializing_if = "Option::is_none")]
    published_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Page {
    /// Create a new draft, stamping the author and the current time.
    pub fn create(id: PageId, payload: Map<String, Value>, created_by: String) -> Self {
        Self {
            id,
            status: PageStatus::Draft,
            created_by,
            created_at: Utc::now(),
            published_by: None,
            published_at: None,
            payload: strip_reserved(payload),
        }
    }

    /// Shallow merge of `updates` into the payload: present keys
    /// replace, absent keys are preserved. Status and stamps are
    /// untouched regardless of what `updates` carries.
    pub fn merge_payload(&self, updates: Map<String, Value>) -> Self {
        let mut merged = self.payload.clone();
        for (key, value) in strip_reserved(updates) {
            merged.insert(key, value);
        }

        Self {
            payload: merged,
            ..self.clone()
        }
    }

    /// Transition Draft → Published, stamping the publisher and the
    /// current time together. The only state transition a page has;
    /// there is no reverse.
    pub fn publish(self, published_by: String) -> Result<Self, PageError> {
        if self.status == PageStatus::Published {
            return Err(PageError::AlreadyPublished);
        }

        Ok(Self {
            status: PageStatus::Published,
            published_by: Some(published_by),
            published_at: Some(Utc::now()),
            ..self
        })
    }

    pub fn id(&self) -> &PageId {
        &self.id
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn published_by(&self) -> Option<&str> {
        self.published_by.as_deref()
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Author-supplied field by name.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

fn strip_reserved(mut payload: Map<String, Value>) -> Map<String, Value> {
    for field in RESERVED_FIELDS {
        payload.remove(field);
    }
    payload
}
