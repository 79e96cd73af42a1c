use crate::domain::media::MediaId;
use crate::domain::page_id::PageId;
use serde_json::{Map, Value};

/// Page creation use case input. The payload is the author-supplied
/// content; its shape is caller-defined and opaque to the engine.
#[derive(Debug)]
pub struct CreatePageCommand {
    pub payload: Map<String, Value>,
    pub acting_user_id: Option<String>,
}

/// In-place page update use case input. `updates` is shallow-merged
/// into the payload of whichever collection currently holds the page.
#[derive(Debug)]
pub struct UpdatePageCommand {
    pub page_id: PageId,
    pub updates: Map<String, Value>,
    pub acting_user_id: Option<String>,
}

/// Page deletion use case input.
#[derive(Debug)]
pub struct DeletePageCommand {
    pub page_id: PageId,
    pub acting_user_id: Option<String>,
}

/// Draft → Published transition use case input.
#[derive(Debug)]
pub struct PublishPageCommand {
    pub page_id: PageId,
    pub acting_user_id: Option<String>,
}

/// Media upload use case input.
#[derive(Debug)]
pub struct UploadMediaCommand {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
    pub acting_user_id: Option<String>,
}

/// Media deletion use case input.
#[derive(Debug)]
pub struct DeleteMediaCommand {
    pub media_id: MediaId,
    pub acting_user_id: Option<String>,
}
