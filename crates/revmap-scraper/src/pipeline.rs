//! Pipeline orchestration: resolve → domain-filter → extract → aggregate.

use chrono::NaiveDateTime;
use revmap_core::CompanyIdentity;
use thiserror::Error;

use crate::aggregate::aggregate;
use crate::domain::domains_match;
use crate::fetch::PageFetcher;
use crate::platform::Platform;
use crate::types::PlatformSummary;

/// Fatal pipeline outcomes. Field-level gaps never surface here — they
/// degrade to absent values inside the extractor.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The platform search produced no candidate listings at all.
    #[error("no cards found for company \"{company}\" on {platform}")]
    NoCandidates { company: String, platform: String },

    /// Candidates existed, but none matched the company website's domain —
    /// the company is listed under an unrelated domain, or not at all.
    #[error(
        "no cards matching website \"{website}\" found for company \"{company}\" on {platform}"
    )]
    NoDomainMatch {
        company: String,
        website: String,
        platform: String,
    },

    /// Every matching candidate failed to fetch or extract.
    #[error("no valid cards could be extracted for company \"{company}\" on {platform}")]
    NoValidCards { company: String, platform: String },
}

/// Runs the full analysis for one company on one platform.
///
/// Stages are strictly sequential and nothing is retried across them: a card
/// that fails to fetch or extract is dropped without affecting the others.
/// The reference time is supplied by the caller so date resolution is
/// deterministic.
///
/// # Errors
///
/// Only the three [`AnalysisError`] variants — empty search, empty domain
/// filter, or every card dropped — escape as errors.
pub async fn run_analysis<F: PageFetcher>(
    fetcher: &F,
    platform: &dyn Platform,
    identity: &CompanyIdentity,
    now: NaiveDateTime,
) -> Result<PlatformSummary, AnalysisError> {
    let search_url = platform.search_url(identity);
    tracing::debug!(platform = platform.name(), url = %search_url, "resolving candidate cards");

    let candidates = match fetcher.fetch_page(&search_url).await {
        Some(html) => platform.card_urls(&html),
        None => Vec::new(),
    };
    if candidates.is_empty() {
        return Err(AnalysisError::NoCandidates {
            company: identity.name.clone(),
            platform: platform.name().to_owned(),
        });
    }

    let matching: Vec<String> = candidates
        .into_iter()
        .filter(|url| {
            let keep = domains_match(url, &identity.website);
            if !keep {
                tracing::debug!(url = %url, website = %identity.website, "skipping candidate — domain mismatch");
            }
            keep
        })
        .collect();
    if matching.is_empty() {
        return Err(AnalysisError::NoDomainMatch {
            company: identity.name.clone(),
            website: identity.website.clone(),
            platform: platform.name().to_owned(),
        });
    }

    let mut cards = Vec::new();
    for url in &matching {
        // A fetch failure skips this URL only.
        let Some(html) = fetcher.fetch_page(url).await else {
            continue;
        };
        match platform.parse_card(&html, url, now) {
            Some(card) => cards.push(card),
            None => tracing::warn!(url = %url, "page has no rating anchor — dropping card"),
        }
    }
    if cards.is_empty() {
        return Err(AnalysisError::NoValidCards {
            company: identity.name.clone(),
            platform: platform.name().to_owned(),
        });
    }

    tracing::debug!(platform = platform.name(), cards = cards.len(), "aggregating cards");
    Ok(aggregate(platform.name(), cards))
}
