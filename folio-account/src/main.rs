use std::net::SocketAddr;

use folio_store::SledKeyValueStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use folio_account::presentation;
use folio_account::AccountService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir =
        std::env::var("FOLIO_ACCOUNT_DATA_DIR").unwrap_or_else(|_| "data/account".to_string());
    let store = SledKeyValueStore::open(&data_dir)?;
    let account = AccountService::load(store)?;

    let app = presentation::create_router(account);

    let port: u16 = std::env::var("FOLIO_ACCOUNT_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4002);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("folio-account server listening on http://{addr}");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
