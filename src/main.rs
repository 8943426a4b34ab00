use splitbook::api;
use splitbook::config::CONFIG;
use splitbook::{InMemoryStorage, LedgerService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let storage = InMemoryStorage::new();
    let service = Arc::new(LedgerService::new(storage));
    let app = api::router(service);

    let addr = CONFIG.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);
    info!("API docs at http://{}/doc", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
