//! Platform capabilities: search-URL construction, card-link discovery, and
//! card parsing for each supported review platform.
//!
//! A [`Platform`] is pure over page content — fetching belongs to the
//! [`crate::fetch::PageFetcher`] collaborator — which keeps every method
//! testable against static HTML and lets one orchestrator serve all
//! platforms.

mod gis2;
mod yandex;

pub use gis2::TwoGis;
pub use yandex::YandexMaps;

use std::collections::HashSet;

use chrono::NaiveDateTime;
use regex::Regex;
use revmap_core::CompanyIdentity;

use crate::types::CardRecord;

/// One review platform's discovery and parsing rules.
pub trait Platform: Send + Sync {
    /// Platform identifier used in summaries and error messages.
    fn name(&self) -> &'static str;

    /// Search-results URL for the company.
    fn search_url(&self, identity: &CompanyIdentity) -> String;

    /// Candidate listing URLs found on a search-results page: absolute,
    /// deduplicated, and with listing sub-pages excluded.
    fn card_urls(&self, search_html: &str) -> Vec<String>;

    /// Parses one fetched card page. `None` means the page is not a listing.
    fn parse_card(&self, card_html: &str, card_url: &str, now: NaiveDateTime)
        -> Option<CardRecord>;
}

/// Collects the group-1 captures of each pattern over `html`, in pattern
/// order. Multiple patterns cover both attribute orders of the same element.
fn collect_hrefs(patterns: &[&str], html: &str) -> Vec<String> {
    let mut hrefs = Vec::new();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid link regex");
        hrefs.extend(
            re.captures_iter(html)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_owned())),
        );
    }
    hrefs
}

/// Resolves `href` against `base` (scheme+host, no trailing slash). Only
/// http(s) links survive; anything else (`javascript:`, `mailto:`, relative
/// fragments) is dropped.
fn absolutize(href: &str, base: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_owned());
    }
    if href.starts_with('/') {
        return Some(format!("{base}{href}"));
    }
    None
}

/// First-seen-order dedup; candidate sets carry set semantics.
fn dedup(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|url| seen.insert(url.clone())).collect()
}

/// Listing sub-pages (review/photo/gallery tabs) are views of the same card,
/// not distinct cards.
fn is_sub_page(url: &str) -> bool {
    const SUB_PAGE_SEGMENTS: [&str; 3] = ["/reviews", "/photos", "/gallery"];
    SUB_PAGE_SEGMENTS.iter().any(|segment| {
        url.ends_with(segment)
            || url.contains(&format!("{segment}/"))
            || url.contains(&format!("{segment}?"))
    })
}
