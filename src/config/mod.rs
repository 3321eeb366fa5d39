//! Server Configuration
//!
//! Process-wide settings the endpoint layer reads: the supported API version
//! window, the deployment mode, and response rendering defaults. Built once
//! and shared immutably (`Arc<ServerConfig>`) by every endpoint.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Lowest API version served by default
pub const DEFAULT_MIN_API_VERSION: i64 = 0;

/// Highest API version served by default
pub const DEFAULT_MAX_API_VERSION: i64 = 1;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Lowest accepted `X-Ops-Server-API-Version` (default: 0)
    #[serde(default = "default_min_api_version")]
    pub min_api_version: i64,

    /// Highest accepted `X-Ops-Server-API-Version` (default: 1)
    #[serde(default = "default_max_api_version")]
    pub max_api_version: i64,

    /// Organization the deployment is pinned to. `None` means multi-org.
    #[serde(default)]
    pub single_org: Option<String>,

    /// Reject requests that do not accept application/json (default: true)
    #[serde(default = "default_true")]
    pub json_only: bool,

    /// Pretty-print JSON bodies (default: true)
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Fixed base URI for rendered links. When unset the HTTP adapter derives
    /// it from the Host header.
    #[serde(default)]
    pub base_uri: Option<String>,
}

fn default_min_api_version() -> i64 {
    DEFAULT_MIN_API_VERSION
}

fn default_max_api_version() -> i64 {
    DEFAULT_MAX_API_VERSION
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            min_api_version: default_min_api_version(),
            max_api_version: default_max_api_version(),
            single_org: None,
            json_only: true,
            pretty_json: true,
            base_uri: None,
        }
    }
}

impl ServerConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON config document
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: ServerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Pin the deployment to a single organization
    pub fn with_single_org(mut self, org: impl Into<String>) -> Self {
        self.single_org = Some(org.into());
        self
    }

    /// Set the accepted API version window
    pub fn with_api_versions(mut self, min: i64, max: i64) -> Self {
        self.min_api_version = min;
        self.max_api_version = max;
        self
    }

    /// Check invariants the rest of the crate relies on
    pub fn validate(&self) -> ConfigResult<()> {
        let (min, max) = (self.min_api_version, self.max_api_version);
        if min < 0 || max < 0 {
            return Err(ConfigError::NegativeVersion { min, max });
        }
        if min > max {
            return Err(ConfigError::InvalidVersionRange { min, max });
        }
        if matches!(self.single_org.as_deref(), Some("")) {
            return Err(ConfigError::EmptySingleOrg);
        }
        Ok(())
    }

    /// Whether URIs are rendered without the organization prefix
    pub fn is_single_org(&self) -> bool {
        self.single_org.is_some()
    }
}
