pub mod analytics;
pub mod handlers;
pub mod models;
pub mod review;

// Re-exports
pub use handlers::{health_handler, root_handler};
pub use models::*;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Full application router with CORS open to any origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(review::routes())
        .merge(analytics::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
