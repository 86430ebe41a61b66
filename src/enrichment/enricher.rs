use super::chat::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use super::{parse_feedback, user_prompt, EnrichError, Enrichment, Feedback, SYSTEM_PROMPT};
use crate::config::LlmConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Turns a rating and review text into AI feedback via a chat-completion API
pub struct FeedbackEnricher {
    client: reqwest::Client,
    config: LlmConfig,
}

impl FeedbackEnricher {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("review-feedback-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        if config.api_key.is_none() {
            warn!("⚠️  OPENROUTER_API_KEY not set, reviews will get fallback feedback");
        }

        info!(model = %config.model, endpoint = %config.endpoint, "Feedback enricher ready");
        Ok(Self { client, config })
    }

    /// Never fails: any problem with the model call yields the fallback payload.
    pub async fn enrich(&self, rating: u8, review_text: &str) -> Enrichment {
        match self.request_feedback(rating, review_text).await {
            Ok(feedback) => Enrichment::Generated(feedback),
            Err(reason) => {
                warn!(rating, error = %reason, "Model feedback unavailable, using fallback");
                Enrichment::fallback(reason)
            }
        }
    }

    pub fn build_request(&self, rating: u8, review_text: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_prompt(rating, review_text)),
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat::json_object(),
        }
    }

    async fn request_feedback(&self, rating: u8, review_text: &str) -> Result<Feedback, EnrichError> {
        let api_key = self.config.api_key.as_deref().ok_or(EnrichError::MissingApiKey)?;
        let request = self.build_request(rating, review_text);

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::Status(status));
        }

        let body: ChatResponse = response.json().await?;
        let content = body.first_content().ok_or(EnrichError::EmptyResponse)?;
        debug!(len = content.len(), "Model content received");

        parse_feedback(content)
    }
}
