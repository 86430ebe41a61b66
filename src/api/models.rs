use crate::enrichment::FeedbackEnricher;
use crate::storage::{ReviewStore, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReviewStore>,
    pub enricher: Arc<FeedbackEnricher>,
}

/// Review submission
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    /// Signed so out-of-range values reach validation instead of failing to parse
    pub rating: i64,
    pub review_text: String,
}

impl CreateReviewRequest {
    /// Only the rating is checked; any review text is accepted.
    pub fn validate(&self) -> Result<u8, String> {
        match u8::try_from(self.rating) {
            Ok(rating @ 1..=5) => Ok(rating),
            _ => Err("Rating must be between 1 and 5".to_string()),
        }
    }
}

/// Liveness response for `GET /`
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub message: String,
    pub backend: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub total_reviews: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(format!("Storage failure: {}", e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse {
            error: status.to_string(),
            detail,
        }))
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rating: i64) -> CreateReviewRequest {
        CreateReviewRequest { rating, review_text: String::new() }
    }

    #[test]
    fn accepts_one_through_five() {
        for rating in 1..=5 {
            assert_eq!(request(rating).validate(), Ok(rating as u8));
        }
    }

    #[test]
    fn rejects_out_of_range_ratings() {
        for rating in [i64::MIN, -1, 0, 6, 255, 256, i64::MAX] {
            assert_eq!(
                request(rating).validate(),
                Err("Rating must be between 1 and 5".to_string())
            );
        }
    }
}
