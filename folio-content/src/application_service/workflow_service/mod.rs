pub mod command;
pub mod port;
pub mod service;

pub use command::{
    CreatePageCommand, DeleteMediaCommand, DeletePageCommand, PublishPageCommand,
    UpdatePageCommand, UploadMediaCommand,
};
pub use port::{MediaStorage, MediaStorageError, NotificationSink, NotificationSinkError};
pub use service::{WorkflowError, WorkflowService};
