use std::net::SocketAddr;
use std::path::PathBuf;

use folio_notify::{make_subscriber, Notification, NotificationCenter};
use folio_store::SledKeyValueStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use folio_content::infrastructure::{
    LocalMediaStorage, NotificationCenterSink, UuidMediaIdGenerator, UuidPageIdGenerator,
};
use folio_content::presentation;
use folio_content::WorkflowService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir = PathBuf::from(
        std::env::var("FOLIO_CONTENT_DATA_DIR").unwrap_or_else(|_| "data/content".to_string()),
    );
    let store = SledKeyValueStore::open(data_dir.join("kv"))?;
    let media_storage = LocalMediaStorage::create_with_path(data_dir.join("media"))?;

    let center = NotificationCenter::new();
    center.subscribe(make_subscriber(|n: &Notification| {
        tracing::info!(title = %n.title, description = %n.description, "notification");
    }));

    let workflow = WorkflowService::load(
        UuidPageIdGenerator,
        UuidMediaIdGenerator,
        store,
        media_storage,
        NotificationCenterSink::new(center),
    )?;

    let app = presentation::create_router(workflow);

    let port: u16 = std::env::var("FOLIO_CONTENT_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4001);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("folio-content server listening on http://{addr}");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
