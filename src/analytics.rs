use crate::storage::Review;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate view over every stored review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub total: usize,
    pub average_rating: f64,
    pub rating_counts: BTreeMap<u8, usize>,
}

pub fn summarize(reviews: &[Review]) -> Analytics {
    let mut rating_counts = BTreeMap::new();
    let mut sum: u64 = 0;

    for review in reviews {
        let rating = review.review.rating;
        sum += u64::from(rating);
        *rating_counts.entry(rating).or_insert(0) += 1;
    }

    let total = reviews.len();
    let average_rating = if total == 0 {
        0.0
    } else {
        round2(sum as f64 / total as f64)
    };

    Analytics { total, average_rating, rating_counts }
}

/// Rounds the exact binary value to two decimals, ties to even.
/// Scaling by 100 first would add its own rounding error (43 / 40 -> 1.08).
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
