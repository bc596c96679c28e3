//! HTTP server for quotebook.
//!
//! Server-rendered pages for the random quote, the add forms and the
//! popularity rankings, plus a JSON endpoint for votes.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api_error;
mod handlers;
mod pages;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use quotebook_service::{QuoteService, SourceService};
use quotebook_storage::StorageBackend;
use tower_http::trace::TraceLayer;

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Quote creation, selection, votes and rankings
    pub quote_service: Arc<QuoteService>,
    /// Source registry
    pub source_service: Arc<SourceService>,
    /// Name of the active storage backend
    pub backend: &'static str,
}

impl AppState {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        let backend = storage.kind();
        Self {
            quote_service: Arc::new(QuoteService::new(Arc::clone(&storage))),
            source_service: Arc::new(SourceService::new(storage)),
            backend,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::quotes::random_quote))
        .route(
            "/add-quote/",
            get(handlers::quotes::add_quote_page).post(handlers::quotes::add_quote_submit),
        )
        .route(
            "/add-quote",
            get(handlers::quotes::add_quote_page).post(handlers::quotes::add_quote_submit),
        )
        .route(
            "/add-source/",
            get(handlers::sources::add_source_page).post(handlers::sources::add_source_submit),
        )
        .route(
            "/add-source",
            get(handlers::sources::add_source_page).post(handlers::sources::add_source_submit),
        )
        .route("/popular/", get(handlers::popular::popular_page))
        .route("/popular", get(handlers::popular::popular_page))
        .route("/like/{id}/", post(handlers::votes::vote))
        .route("/like/{id}", post(handlers::votes::vote))
        .route("/health", get(health))
        .route("/api/version", get(version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION"), backend: state.backend })
}
