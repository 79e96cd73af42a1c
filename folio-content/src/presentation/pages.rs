use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::application_service::workflow_service::{
    CreatePageCommand, DeletePageCommand, PublishPageCommand, UpdatePageCommand,
};
use crate::domain::page::Page;
use crate::domain::page_id::PageId;

use super::{acting_user, error_response, AppState};

#[derive(Serialize)]
pub struct UpdatePageResponse {
    pub found: bool,
}

#[derive(Serialize)]
pub struct DeletePageResponse {
    pub deleted: bool,
}

#[derive(Serialize)]
pub struct PublishPageResponse {
    pub published: bool,
    pub page: Option<Page>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pages", get(list_pages).post(create_page))
        .route("/drafts", get(list_drafts))
        .route("/pages/{id}", patch(update_page).delete(delete_page))
        .route("/pages/{id}/publish", post(publish_page))
}

async fn list_pages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Page>>, (StatusCode, String)> {
    let pages = state.workflow.pages().map_err(error_response)?;
    Ok(Json(pages))
}

async fn list_drafts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Page>>, (StatusCode, String)> {
    let drafts = state.workflow.drafts().map_err(error_response)?;
    Ok(Json(drafts))
}

async fn create_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<Page>, (StatusCode, String)> {
    let page = state
        .workflow
        .create_page(CreatePageCommand {
            payload,
            acting_user_id: acting_user(&headers),
        })
        .map_err(error_response)?;

    Ok(Json(page))
}

async fn update_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(updates): Json<Map<String, Value>>,
) -> Result<Json<UpdatePageResponse>, (StatusCode, String)> {
    let found = state
        .workflow
        .update_page(UpdatePageCommand {
            page_id: PageId::new(id),
            updates,
            acting_user_id: acting_user(&headers),
        })
        .map_err(error_response)?;

    Ok(Json(UpdatePageResponse { found }))
}

async fn delete_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeletePageResponse>, (StatusCode, String)> {
    let deleted = state
        .workflow
        .delete_page(DeletePageCommand {
            page_id: PageId::new(id),
            acting_user_id: acting_user(&headers),
        })
        .map_err(error_response)?;

    Ok(Json(DeletePageResponse { deleted }))
}

async fn publish_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PublishPageResponse>, (StatusCode, String)> {
    let page = state
        .workflow
        .publish_page(PublishPageCommand {
            page_id: PageId::new(id),
            acting_user_id: acting_user(&headers),
        })
        .map_err(error_response)?;

    Ok(Json(PublishPageResponse {
        published: page.is_some(),
        page,
    }))
}
