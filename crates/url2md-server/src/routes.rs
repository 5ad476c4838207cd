//! Router assembly and shared state

use crate::handlers;
use axum::routing::post;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use url2md::ConvertAdapter;

/// Shared per-process state
///
/// Holds only the conversion adapter: the fixed engine configuration is
/// built once at startup and shared by reference. Nothing else outlives a
/// single request.
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<ConvertAdapter>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            adapter: Arc::new(ConvertAdapter::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application router
///
/// API routes live under `/api`; everything else falls through to the
/// static landing page directory.
pub fn create_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/convert", post(handlers::convert))
        .route("/convert-simple", post(handlers::convert_simple));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(public_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
