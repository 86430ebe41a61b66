use crate::api::models::*;
use crate::storage::{NewReview, Review};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

pub async fn create_review_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    // Validate
    let rating = request.validate().map_err(AppError::BadRequest)?;

    info!(rating, text_len = request.review_text.len(), "Submitting review");

    // Enrich
    let enrichment = state.enricher.enrich(rating, &request.review_text).await;
    let fallback = enrichment.is_fallback();

    // Persist
    let review = NewReview::new(rating, request.review_text, enrichment.into_feedback());
    let stored = state.store.append(review).await?;

    info!(id = %stored.id, fallback, "Review stored");

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_reviews_handler(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.store.list_all().await?;
    info!(count = reviews.len(), "Listing reviews");
    Ok(Json(reviews))
}
