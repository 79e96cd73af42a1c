use crate::domain::media::{MediaId, MediaIdGenerator};
use crate::domain::page_id::{PageId, PageIdGenerator};
use uuid::Uuid;

/// Random v4 uuid page ids, collision-free within the process.
pub struct UuidPageIdGenerator;

impl PageIdGenerator for UuidPageIdGenerator {
    fn generate(&self) -> PageId {
        PageId::new(Uuid::new_v4().to_string())
    }
}

/// Random v4 uuid media ids.
pub struct UuidMediaIdGenerator;

impl MediaIdGenerator for UuidMediaIdGenerator {
    fn generate(&self) -> MediaId {
        MediaId::new(Uuid::new_v4().to_string())
    }
}
