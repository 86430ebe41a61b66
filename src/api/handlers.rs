use crate::api::models::*;
use axum::{extract::State, Json};

/// Liveness probe
pub async fn root_handler(State(state): State<AppState>) -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Review feedback API is running".to_string(),
        backend: state.store.backend().to_string(),
    })
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let total_reviews = state.store.list_all().await?.len();

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.store.backend().to_string(),
        total_reviews,
    }))
}
