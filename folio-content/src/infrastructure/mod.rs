pub mod id_generator;
pub mod media_storage;
pub mod notification_center_sink;

pub use id_generator::{UuidMediaIdGenerator, UuidPageIdGenerator};
pub use media_storage::LocalMediaStorage;
pub use notification_center_sink::NotificationCenterSink;
