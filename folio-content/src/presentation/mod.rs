use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::{routing::get, Router};
use folio_store::SledKeyValueStore;

use crate::application_service::workflow_service::{WorkflowError, WorkflowService};
use crate::infrastructure::{
    LocalMediaStorage, NotificationCenterSink, UuidMediaIdGenerator, UuidPageIdGenerator,
};

pub mod media;
pub mod pages;

/// Engine wiring used by the server binary.
pub type ContentWorkflowService = WorkflowService<
    UuidPageIdGenerator,
    UuidMediaIdGenerator,
    SledKeyValueStore,
    LocalMediaStorage,
    NotificationCenterSink,
>;

pub struct AppState {
    pub workflow: ContentWorkflowService,
}

async fn health() -> &'static str {
    "ok"
}

pub fn create_router(workflow: ContentWorkflowService) -> Router {
    let state = Arc::new(AppState { workflow });

    Router::new()
        .route("/health", get(health))
        .merge(pages::routes())
        .merge(media::routes())
        .with_state(state)
}

/// The acting user id accompanying a request, if any. The identity
/// provider authenticates; this layer only forwards the id.
pub(crate) fn acting_user(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub(crate) fn error_response(e: WorkflowError) -> (StatusCode, String) {
    let status = match e {
        WorkflowError::Unauthenticated => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}
