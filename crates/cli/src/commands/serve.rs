use std::sync::Arc;

use anyhow::Result;
use quotebook_http::{create_router, AppState};
use quotebook_storage::StorageBackend;

pub(crate) async fn run(storage: Arc<StorageBackend>, host: &str, port: u16) -> Result<()> {
    let backend = storage.kind();
    let state = Arc::new(AppState::new(storage));
    let router = create_router(state);

    let addr = format!("{host}:{port}");
    tracing::info!(%addr, backend, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
