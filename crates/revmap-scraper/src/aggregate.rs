//! Platform-level aggregation of extracted cards.

use crate::types::{CardRecord, PlatformSummary};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Folds extracted cards into one per-platform summary.
///
/// `overall_rating` sums the ratings that are present but divides by the
/// total card count, so a card without a rating contributes zero to the sum
/// while still widening the denominator. Count fields are plain sums;
/// `avg_response_time_days` averages the per-card latency means that exist.
/// Card order is preserved in `cards_details`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(platform: &str, cards: Vec<CardRecord>) -> PlatformSummary {
    let card_count = cards.len();

    let mut rating_sum = 0.0f64;
    let mut total_reviews = 0u32;
    let mut answered = 0u32;
    let mut unanswered = 0u32;
    let mut negative = 0u32;
    let mut positive = 0u32;
    let mut latency_samples: Vec<f64> = Vec::new();

    for card in &cards {
        if let Some(rating) = card.rating {
            rating_sum += rating;
        }
        total_reviews += card.total_reviews;
        answered += card.answered_reviews;
        unanswered += card.unanswered_reviews;
        negative += card.negative_reviews;
        positive += card.positive_reviews;
        if let Some(seconds) = card.avg_response_time_seconds {
            latency_samples.push(seconds);
        }
    }

    let overall_rating = if card_count == 0 {
        0.0
    } else {
        round2(rating_sum / card_count as f64)
    };

    let avg_response_time_days = if latency_samples.is_empty() {
        None
    } else {
        let mean_seconds = latency_samples.iter().sum::<f64>() / latency_samples.len() as f64;
        Some(round2(mean_seconds / SECONDS_PER_DAY))
    };

    PlatformSummary {
        platform: platform.to_owned(),
        card_count,
        overall_rating,
        total_reviews_count: total_reviews,
        answered_reviews_count: answered,
        unanswered_reviews_count: unanswered,
        negative_reviews_count: negative,
        positive_reviews_count: positive,
        avg_response_time_days,
        cards_details: cards,
    }
}

/// Rounds to two decimal places, the precision of the serialized report.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(url: &str, rating: Option<f64>, total_reviews: u32) -> CardRecord {
        CardRecord {
            url: url.to_owned(),
            rating,
            total_reviews,
            answered_reviews: 0,
            unanswered_reviews: 0,
            negative_reviews: 0,
            positive_reviews: 0,
            avg_response_time_seconds: None,
            reviews: Vec::new(),
        }
    }

    #[test]
    fn unrated_cards_dilute_the_overall_rating() {
        // Regression guard: the denominator is the full card count, not the
        // count of cards that have a rating.
        let cards = vec![
            card("a", Some(4.0), 10),
            card("b", None, 5),
            card("c", Some(5.0), 0),
        ];
        let summary = aggregate("2gis", cards);

        assert_eq!(summary.card_count, 3);
        assert_eq!(summary.overall_rating, 3.0);
        assert_eq!(summary.total_reviews_count, 15);
    }

    #[test]
    fn counts_are_plain_sums() {
        let mut a = card("a", Some(4.0), 7);
        a.answered_reviews = 2;
        a.unanswered_reviews = 1;
        a.negative_reviews = 1;
        a.positive_reviews = 2;
        let mut b = card("b", Some(3.0), 3);
        b.answered_reviews = 1;
        b.unanswered_reviews = 2;
        b.positive_reviews = 1;

        let summary = aggregate("yandex", vec![a, b]);
        assert_eq!(summary.total_reviews_count, 10);
        assert_eq!(summary.answered_reviews_count, 3);
        assert_eq!(summary.unanswered_reviews_count, 3);
        assert_eq!(summary.negative_reviews_count, 1);
        assert_eq!(summary.positive_reviews_count, 3);
    }

    #[test]
    fn response_time_is_averaged_and_converted_to_days() {
        let mut a = card("a", Some(4.0), 1);
        a.avg_response_time_seconds = Some(86_400.0);
        let mut b = card("b", Some(5.0), 1);
        b.avg_response_time_seconds = Some(172_800.0);
        let c = card("c", Some(3.0), 1);

        let summary = aggregate("2gis", vec![a, b, c]);
        assert_eq!(summary.avg_response_time_days, Some(1.5));
    }

    #[test]
    fn response_time_is_none_without_samples() {
        let summary = aggregate("2gis", vec![card("a", Some(4.0), 1)]);
        assert_eq!(summary.avg_response_time_days, None);
    }

    #[test]
    fn rounding_is_two_decimals() {
        let cards = vec![
            card("a", Some(4.5), 0),
            card("b", Some(4.0), 0),
            card("c", Some(4.0), 0),
        ];
        // (4.5 + 4.0 + 4.0) / 3 = 4.1666… → 4.17
        let summary = aggregate("2gis", cards);
        assert_eq!(summary.overall_rating, 4.17);
    }

    #[test]
    fn card_order_is_preserved() {
        let cards = vec![card("first", None, 0), card("second", None, 0)];
        let summary = aggregate("2gis", cards);
        assert_eq!(summary.cards_details[0].url, "first");
        assert_eq!(summary.cards_details[1].url, "second");
    }

    #[test]
    fn empty_input_yields_zeroed_summary() {
        let summary = aggregate("2gis", Vec::new());
        assert_eq!(summary.card_count, 0);
        assert_eq!(summary.overall_rating, 0.0);
        assert_eq!(summary.avg_response_time_days, None);
    }
}
