//! Service configuration
//!
//! Settings for the sync service, overridable through `DEPOT_*` environment
//! variables. Values that fail to parse fall back to the defaults.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::api::DEFAULT_REQUEST_TIMEOUT;
use crate::sync::DEFAULT_RETRY_BUDGET;

/// Configuration for the sync service
#[derive(Debug, Clone)]
pub struct SyncServiceConfig {
    /// Base URL of the remote transaction service API.
    pub api_base_url: String,
    /// Directory holding the queue files and the credential token.
    pub data_dir: PathBuf,
    /// Upper bound on each remote request.
    pub request_timeout: Duration,
    /// Failed attempts before a record is dead-lettered.
    pub retry_budget: u32,
}

impl Default for SyncServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api/v1".to_string(),
            data_dir: PathBuf::from("data"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

impl SyncServiceConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `DEPOT_API_URL`, `DEPOT_DATA_DIR`,
    /// `DEPOT_REQUEST_TIMEOUT_SECS`, `DEPOT_RETRY_BUDGET`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: std::env::var("DEPOT_API_URL").unwrap_or(defaults.api_base_url),
            data_dir: std::env::var("DEPOT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            request_timeout: parse_env("DEPOT_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            retry_budget: parse_env("DEPOT_RETRY_BUDGET").unwrap_or(defaults.retry_budget),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable value for {}: {}", name, raw);
            None
        }
    }
}
