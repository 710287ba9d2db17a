pub mod app_config;
pub mod config;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The company one analysis run is about. Immutable input to a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyIdentity {
    /// Display name used to build platform search queries.
    pub name: String,
    /// Company website (bare hostname or full URL) used to confirm that a
    /// discovered listing belongs to this company.
    pub website: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
