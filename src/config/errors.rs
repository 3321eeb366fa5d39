//! # Configuration Errors

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
///
/// All of these are startup faults; none reach a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("API version range is empty: min {min} > max {max}")]
    InvalidVersionRange { min: i64, max: i64 },

    #[error("API versions must be non-negative (min {min}, max {max})")]
    NegativeVersion { min: i64, max: i64 },

    #[error("single_org must not be empty")]
    EmptySingleOrg,
}
