//! Retry logic for transient fetch failures.
//!
//! Network-level errors and throttling/server statuses are retried with
//! exponential backoff; client errors (4xx other than 429) are propagated
//! immediately since retrying would return the same result.

use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;

/// Returns `true` if `err` represents a transient condition worth retrying.
///
/// Retriable: [`ScrapeError::Http`] (connection reset, timeout, TLS hiccup)
/// and [`ScrapeError::UnexpectedStatus`] for 429 or any 5xx.
/// Everything else — including [`ScrapeError::InvalidProxy`] — propagates
/// immediately.
fn is_retriable(err: &ScrapeError) -> bool {
    match err {
        ScrapeError::Http(_) => true,
        ScrapeError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        ScrapeError::InvalidProxy { .. } => false,
    }
}

/// Executes `operation`, sleeping `backoff_base_secs * 2^attempt` seconds
/// between attempts on transient errors, up to `max_retries` additional
/// attempts after the first. The last error is returned once retries are
/// exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                err
            }
        };

        // Cap the shift so extreme configs cannot overflow the delay.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient fetch error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
