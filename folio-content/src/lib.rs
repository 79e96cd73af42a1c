pub mod application_service;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application_service::workflow_service::{
    CreatePageCommand, DeleteMediaCommand, DeletePageCommand, MediaStorage, MediaStorageError,
    NotificationSink, NotificationSinkError, PublishPageCommand, UpdatePageCommand,
    UploadMediaCommand, WorkflowError, WorkflowService,
};
pub use domain::media::{MediaAsset, MediaId, MediaIdGenerator, MediaLocator};
pub use domain::page::{Page, PageError, PageStatus};
pub use domain::page_id::{PageId, PageIdGenerator};
