use std::sync::Arc;

use axum::{routing::get, Router};
use folio_store::SledKeyValueStore;

use crate::application_service::account_service::AccountService;

pub mod session;

pub struct AppState {
    pub account: AccountService<SledKeyValueStore>,
}

async fn health() -> &'static str {
    "ok"
}

pub fn create_router(account: AccountService<SledKeyValueStore>) -> Router {
    let state = Arc::new(AppState { account });

    Router::new()
        .route("/health", get(health))
        .merge(session::routes())
        .with_state(state)
}
