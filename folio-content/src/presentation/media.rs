use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application_service::workflow_service::{DeleteMediaCommand, UploadMediaCommand};
use crate::domain::media::{MediaAsset, MediaId};

use super::{acting_user, error_response, AppState};

#[derive(Deserialize)]
pub struct UploadMediaRequest {
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub content_base64: String,
}

#[derive(Serialize)]
pub struct DeleteMediaResponse {
    pub deleted: bool,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/media", get(list_media).post(upload_media))
        .route("/media/{id}", axum::routing::delete(delete_media))
}

async fn list_media(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MediaAsset>>, (StatusCode, String)> {
    let media = state.workflow.media().map_err(error_response)?;
    Ok(Json(media))
}

async fn upload_media(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<UploadMediaRequest>,
) -> Result<Json<MediaAsset>, (StatusCode, String)> {
    let content = BASE64_STANDARD.decode(&req.content_base64).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("invalid base64 content: {e}"),
        )
    })?;

    let asset = state
        .workflow
        .upload_media(UploadMediaCommand {
            name: req.name,
            mime_type: req.mime_type,
            content,
            acting_user_id: acting_user(&headers),
        })
        .map_err(error_response)?;

    Ok(Json(asset))
}

async fn delete_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteMediaResponse>, (StatusCode, String)> {
    let deleted = state
        .workflow
        .delete_media(DeleteMediaCommand {
            media_id: MediaId::new(id),
            acting_user_id: acting_user(&headers),
        })
        .map_err(error_response)?;

    Ok(Json(DeleteMediaResponse { deleted }))
}
