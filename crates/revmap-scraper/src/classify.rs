//! Per-review classification.

use crate::types::ReviewRecord;

/// Sentiment bucket for a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewBucket {
    Positive,
    Negative,
    /// No parseable rating; counts toward neither sentiment counter.
    Unclassified,
}

/// Buckets a review by its rating: `<= 3.0` is negative, anything higher is
/// positive, no rating is unclassified. Pure over one record — no
/// cross-review state.
#[must_use]
pub fn classify(review: &ReviewRecord) -> ReviewBucket {
    match review.rating {
        Some(rating) if rating <= 3.0 => ReviewBucket::Negative,
        Some(_) => ReviewBucket::Positive,
        None => ReviewBucket::Unclassified,
    }
}

/// Elapsed seconds between a review and its reply. `None` unless both the
/// review and the response carry a parsed timestamp.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn response_latency_seconds(review: &ReviewRecord) -> Option<f64> {
    let review_date = review.date?;
    let response_date = review.response.as_ref()?.date?;
    Some((response_date - review_date).num_seconds() as f64)
}
