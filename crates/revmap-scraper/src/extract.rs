//! Card-page extraction.
//!
//! Listing markup differs per platform, so extraction is driven by a
//! [`CardMarkup`] profile of regex selectors while the fallback policy stays
//! shared: every field degrades independently — a rating that does not parse
//! becomes `None`, a missing review section becomes an empty review list with
//! zero counts. Only a page without the rating anchor is rejected outright,
//! since that anchor doubles as the "this is really a listing page" check.

use chrono::NaiveDateTime;
use regex::Regex;

use crate::classify::{classify, response_latency_seconds, ReviewBucket};
use crate::dates::parse_review_date;
use crate::parse::{first_float, first_uint};
use crate::types::{CardRecord, OwnerResponse, ReviewRecord};

/// Regex selectors for one platform's card page.
///
/// Patterns are matched with `(?is)` (case-insensitive, `.` spans newlines);
/// group 1 captures the relevant text or attribute value.
pub(crate) struct CardMarkup {
    /// Card-level rating anchor. A page where this never matches is not a
    /// listing page and the whole card is rejected.
    pub rating: &'static str,
    /// Element whose text carries the platform-reported review total.
    pub review_count: &'static str,
    /// Opening tag of the review section; reviews are only looked for from
    /// this point on. No match means the card legitimately has no reviews.
    pub review_section: &'static str,
    /// Opening tag of one review node; a review's block runs to the next
    /// match or the end of the section region.
    pub review_block: &'static str,
    pub review_rating: &'static str,
    pub review_text: &'static str,
    pub review_date: &'static str,
    /// Opening tag of the operator-response sub-block inside a review node.
    pub response_block: &'static str,
    pub response_text: &'static str,
    pub response_date: &'static str,
}

/// Extracts one card page into a [`CardRecord`].
///
/// Returns `None` only when the rating anchor is entirely absent; every
/// other gap degrades to a default or absent field value.
pub(crate) fn extract_card(
    markup: &CardMarkup,
    html: &str,
    url: &str,
    now: NaiveDateTime,
) -> Option<CardRecord> {
    let rating_text = capture(markup.rating, html)?;
    let rating = first_float(&rating_text);

    let total_reviews = capture(markup.review_count, html)
        .and_then(|text| first_uint(&text))
        .unwrap_or(0);

    let mut reviews: Vec<ReviewRecord> = Vec::new();
    let mut answered = 0u32;
    let mut unanswered = 0u32;
    let mut negative = 0u32;
    let mut positive = 0u32;
    let mut latency_samples: Vec<f64> = Vec::new();

    for block in review_blocks(markup, html) {
        let review = extract_review(markup, block, now);

        if review.response.is_some() {
            answered += 1;
        } else {
            unanswered += 1;
        }
        if let Some(latency) = response_latency_seconds(&review) {
            latency_samples.push(latency);
        }
        match classify(&review) {
            ReviewBucket::Negative => negative += 1,
            ReviewBucket::Positive => positive += 1,
            ReviewBucket::Unclassified => {}
        }

        reviews.push(review);
    }

    Some(CardRecord {
        url: url.to_owned(),
        rating,
        total_reviews,
        answered_reviews: answered,
        unanswered_reviews: unanswered,
        negative_reviews: negative,
        positive_reviews: positive,
        avg_response_time_seconds: mean(&latency_samples),
        reviews,
    })
}

/// One review's fields, each with its own failure boundary.
fn extract_review(markup: &CardMarkup, block: &str, now: NaiveDateTime) -> ReviewRecord {
    let rating = capture(markup.review_rating, block).and_then(|text| first_float(&text));
    let text = capture(markup.review_text, block).unwrap_or_default();
    let date = capture(markup.review_date, block).and_then(|text| parse_review_date(&text, now));
    let response = extract_response(markup, block, now);

    ReviewRecord {
        rating,
        text,
        date,
        response,
    }
}

/// A usable response needs the sub-block plus both a non-empty text body and
/// a parseable date; anything less leaves the review unanswered.
fn extract_response(markup: &CardMarkup, block: &str, now: NaiveDateTime) -> Option<OwnerResponse> {
    let re = Regex::new(markup.response_block).expect("valid response block regex");
    let region = &block[re.find(block)?.start()..];

    let text = capture(markup.response_text, region).filter(|text| !text.is_empty())?;
    let date = capture(markup.response_date, region).and_then(|raw| parse_review_date(&raw, now))?;

    Some(OwnerResponse {
        text,
        date: Some(date),
    })
}

/// Per-review regions: each starts at one match of the review-block pattern
/// inside the review section and runs to the next match or the end of the
/// document.
fn review_blocks<'a>(markup: &CardMarkup, html: &'a str) -> Vec<&'a str> {
    let section_re = Regex::new(markup.review_section).expect("valid review section regex");
    let Some(section) = section_re.find(html) else {
        return Vec::new();
    };
    let region = &html[section.start()..];

    let block_re = Regex::new(markup.review_block).expect("valid review block regex");
    let starts: Vec<usize> = block_re.find_iter(region).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(idx, &start)| {
            let end = starts.get(idx + 1).copied().unwrap_or(region.len());
            &region[start..end]
        })
        .collect()
}

/// First group-1 capture of `pattern` in `haystack`, tag-stripped and
/// whitespace-collapsed.
fn capture(pattern: &str, haystack: &str) -> Option<String> {
    let re = Regex::new(pattern).expect("valid markup regex");
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_text(m.as_str()))
}

/// Strips markup tags and collapses runs of whitespace to single spaces.
fn clean_text(input: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tags regex");
    let without_tags = tags.replace_all(input, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[allow(clippy::cast_precision_loss)]
fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}
