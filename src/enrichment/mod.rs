pub mod chat;
pub mod enricher;

pub use enricher::FeedbackEnricher;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FALLBACK_SUMMARY: &str = "We received your review.";
pub const FALLBACK_ACTION: &str = "The team will manually review this feedback.";
pub const FALLBACK_USER_RESPONSE: &str = "Thanks for sharing! We will improve based on your feedback.";

/// Summary, suggested actions and customer-facing reply for one review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub summary: String,
    pub actions: Vec<String>,
    pub user_response: String,
}

impl Feedback {
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            actions: vec![FALLBACK_ACTION.to_string()],
            user_response: FALLBACK_USER_RESPONSE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request to model endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("model response has no message content")]
    EmptyResponse,

    #[error("model content is not the expected JSON: {0}")]
    InvalidContent(#[from] serde_json::Error),
}

/// Outcome of enriching a review
#[derive(Debug)]
pub enum Enrichment {
    Generated(Feedback),
    Fallback { feedback: Feedback, reason: EnrichError },
}

impl Enrichment {
    pub fn fallback(reason: EnrichError) -> Self {
        Self::Fallback { feedback: Feedback::fallback(), reason }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn feedback(&self) -> &Feedback {
        match self {
            Self::Generated(feedback) | Self::Fallback { feedback, .. } => feedback,
        }
    }

    pub fn into_feedback(self) -> Feedback {
        match self {
            Self::Generated(feedback) | Self::Fallback { feedback, .. } => feedback,
        }
    }
}

pub const SYSTEM_PROMPT: &str = r#"You are an AI assistant helping a business analyze customer reviews.

Given a star rating (1-5) and review text:

1. Create a neutral summary of the review
2. Suggest 2-4 recommended business actions
3. Write a friendly user response

Return STRICT JSON ONLY:
{
 "summary": "...",
 "actions": ["...", "..."],
 "user_response": "..."
}"#;

pub fn user_prompt(rating: u8, review_text: &str) -> String {
    format!("Rating: {}\nReview: {}", rating, review_text)
}

/// Parse the model's message content as a strict JSON `Feedback`.
pub fn parse_feedback(content: &str) -> Result<Feedback, EnrichError> {
    Ok(serde_json::from_str(content.trim())?)
}
