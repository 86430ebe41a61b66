use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enrichment::Feedback;

/// Identifier assigned by the backing store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewId {
    /// Sequence number from the JSON file store
    Seq(u64),
    /// Hex `ObjectId` from the document store
    Doc(String),
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewId::Seq(n) => write!(f, "{}", n),
            ReviewId::Doc(s) => f.write_str(s),
        }
    }
}

/// A review that has been enriched but not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub rating: u8,
    pub review_text: String,
    pub ai_summary: String,
    pub ai_actions: Vec<String>,
    pub ai_user_response: String,
}

impl NewReview {
    pub fn new(rating: u8, review_text: String, feedback: Feedback) -> Self {
        Self {
            timestamp: Utc::now(),
            rating,
            review_text,
            ai_summary: feedback.summary,
            ai_actions: feedback.actions,
            ai_user_response: feedback.user_response,
        }
    }

    pub fn with_id(self, id: ReviewId) -> Review {
        Review { id, review: self }
    }
}

/// A persisted review record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(flatten)]
    pub review: NewReview,
}

/// ISO-8601 in UTC with microseconds and a trailing `Z`.
pub mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_serializes_flat_with_z_timestamp() {
        let ts = DateTime::parse_from_rfc3339("2025-03-01T12:30:45.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        let review = NewReview {
            timestamp: ts,
            rating: 4,
            review_text: "Fast delivery".to_string(),
            ai_summary: "Positive".to_string(),
            ai_actions: vec!["Keep it up".to_string()],
            ai_user_response: "Thanks!".to_string(),
        }
        .with_id(ReviewId::Seq(7));

        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "timestamp": "2025-03-01T12:30:45.123456Z",
                "rating": 4,
                "review_text": "Fast delivery",
                "ai_summary": "Positive",
                "ai_actions": ["Keep it up"],
                "ai_user_response": "Thanks!"
            })
        );
    }

    #[test]
    fn reads_records_written_without_microseconds() {
        let review: Review = serde_json::from_value(json!({
            "id": "65f1c0ffee",
            "timestamp": "2024-11-02T08:00:00Z",
            "rating": 2,
            "review_text": "",
            "ai_summary": "s",
            "ai_actions": [],
            "ai_user_response": "r"
        }))
        .unwrap();

        assert_eq!(review.id, ReviewId::Doc("65f1c0ffee".to_string()));
        assert_eq!(timestamp::format(&review.review.timestamp), "2024-11-02T08:00:00.000000Z");
    }
}
