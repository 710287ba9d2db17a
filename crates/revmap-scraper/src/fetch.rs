//! The page-fetch seam between the pipeline and the HTTP layer.

use std::future::Future;

/// Supplies raw page content to the pipeline.
///
/// Implementations own every transport concern: timeouts, proxies, redirects,
/// retries, user agents. `None` means the page could not be fetched — network
/// failure, timeout, or a non-2xx status — and the pipeline skips that URL
/// rather than failing the run.
pub trait PageFetcher {
    fn fetch_page(&self, url: &str) -> impl Future<Output = Option<String>>;
}
