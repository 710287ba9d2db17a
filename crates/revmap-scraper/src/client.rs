//! HTTP fetcher for platform search and card pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::retry::retry_with_backoff;

/// Production [`PageFetcher`]: a configured reqwest client with retry.
///
/// Non-2xx statuses become typed errors; transient failures (network errors,
/// 429, 5xx) are retried with exponential backoff up to `max_retries`
/// additional attempts. Cookies and TLS details stay inside reqwest — the
/// pipeline never sees them.
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl HttpFetcher {
    /// Creates a fetcher with configured timeout, `User-Agent`, optional
    /// `host:port` proxy, and retry policy. `max_retries = 0` disables
    /// retries.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidProxy`] when the proxy string cannot be
    /// parsed, or [`ScrapeError::Http`] when the underlying client cannot be
    /// constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        proxy: Option<&str>,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScrapeError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);

        if let Some(proxy) = proxy {
            let proxy_url = format!("http://{proxy}");
            let proxy =
                reqwest::Proxy::all(&proxy_url).map_err(|e| ScrapeError::InvalidProxy {
                    proxy: proxy.to_owned(),
                    reason: e.to_string(),
                })?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the body of `url`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — non-2xx after retries (429/5xx
    ///   retried, other 4xx not).
    /// - [`ScrapeError::Http`] — network or TLS failure after retries.
    pub async fn get_html(&self, url: &str) -> Result<String, ScrapeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9,en;q=0.8")
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(ScrapeError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

impl PageFetcher for HttpFetcher {
    /// Degrades fetch errors to `None` at the pipeline seam; the typed error
    /// is logged and the URL is skipped.
    async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.get_html(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url, error = %e, "page fetch failed — skipping URL");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
