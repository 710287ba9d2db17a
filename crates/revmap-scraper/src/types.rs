//! Domain types for review-card extraction and aggregation.
//!
//! Every entity is created fresh per pipeline run and never persisted or
//! shared across runs; summaries are recomputed fully, never patched.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One review found on a card page. Immutable once extracted.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    /// Rating on the platform's scale. `None` when the review node carries
    /// no parseable rating.
    pub rating: Option<f64>,
    /// Review body text; empty when the node has no text block.
    pub text: String,
    /// Posting timestamp, resolved against the run's reference time.
    pub date: Option<NaiveDateTime>,
    /// The business's reply, when one is present and usable.
    pub response: Option<OwnerResponse>,
}

/// A business's reply to a review.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub text: String,
    pub date: Option<NaiveDateTime>,
}

/// Extracted data for one business listing page.
///
/// Invariants: `answered_reviews + unanswered_reviews == reviews.len()`, and
/// `negative_reviews + positive_reviews <= reviews.len()` — a review without
/// a rating counts toward neither sentiment bucket.
#[derive(Debug, Clone, Serialize)]
pub struct CardRecord {
    pub url: String,
    /// Card-level rating; `None` when the rating text does not parse.
    pub rating: Option<f64>,
    /// Platform-reported total review count. May exceed `reviews.len()` —
    /// listing pages only render a window of recent reviews.
    pub total_reviews: u32,
    pub answered_reviews: u32,
    pub unanswered_reviews: u32,
    pub negative_reviews: u32,
    pub positive_reviews: u32,
    /// Mean response latency across this card's answered reviews, in seconds.
    pub avg_response_time_seconds: Option<f64>,
    pub reviews: Vec<ReviewRecord>,
}

/// Aggregated per-platform report.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub platform: String,
    pub card_count: usize,
    /// Sum of present card ratings divided by the total card count — cards
    /// without a rating dilute the mean. Rounded to 2 decimals.
    pub overall_rating: f64,
    pub total_reviews_count: u32,
    pub answered_reviews_count: u32,
    pub unanswered_reviews_count: u32,
    pub negative_reviews_count: u32,
    pub positive_reviews_count: u32,
    /// Mean of per-card response-time means, in days, rounded to 2 decimals.
    /// `None` when no card had a latency sample.
    pub avg_response_time_days: Option<f64>,
    pub cards_details: Vec<CardRecord>,
}
