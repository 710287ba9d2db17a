//! Review-platform scraping and aggregation.
//!
//! Given a [`revmap_core::CompanyIdentity`], the pipeline searches a review
//! platform for the company's listing pages ("cards"), keeps the candidates
//! whose registrable domain matches the company website, extracts rating and
//! review data from each card with per-field fallbacks, and folds the result
//! into one [`types::PlatformSummary`].
//!
//! Fetching is behind the [`fetch::PageFetcher`] seam; everything below it is
//! pure over page content and deterministic given an explicit reference time.

pub mod aggregate;
pub mod classify;
pub mod client;
pub mod dates;
pub mod domain;
pub mod error;
mod extract;
pub mod fetch;
mod parse;
pub mod pipeline;
pub mod platform;
pub mod proxy;
mod retry;
pub mod types;

pub use client::HttpFetcher;
pub use error::ScrapeError;
pub use fetch::PageFetcher;
pub use pipeline::{run_analysis, AnalysisError};
pub use platform::{Platform, TwoGis, YandexMaps};
pub use types::{CardRecord, OwnerResponse, PlatformSummary, ReviewRecord};
