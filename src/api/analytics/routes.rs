use crate::api::analytics::handlers::analytics_handler;
use crate::api::models::AppState;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/analytics", get(analytics_handler))
}
