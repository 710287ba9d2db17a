use std::path::PathBuf;

/// Runtime configuration for the review-scraping pipeline.
///
/// All fields are environment-driven with defaults; see
/// [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Per-request timeout for platform page fetches.
    pub request_timeout_secs: u64,
    /// User-Agent header sent with every platform request.
    pub user_agent: String,
    /// Additional fetch attempts after the first failure for transient errors.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `base * 2^attempt` seconds.
    pub retry_backoff_base_secs: u64,
    /// File with one `host:port` proxy per line. A missing file means the
    /// pipeline runs without a proxy.
    pub proxies_path: PathBuf,
}
