use crate::analytics::{summarize, Analytics};
use crate::api::models::*;
use axum::{extract::State, Json};
use tracing::info;

pub async fn analytics_handler(State(state): State<AppState>) -> Result<Json<Analytics>, AppError> {
    let reviews = state.store.list_all().await?;
    let analytics = summarize(&reviews);

    info!(total = analytics.total, average = analytics.average_rating, "Analytics computed");

    Ok(Json(analytics))
}
