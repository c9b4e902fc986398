//! Runtime configuration for the update transport.
//!
//! SyncConfig is rebuilt on every launch from environment variables with
//! sensible defaults; it is never serialized or persisted.

use std::env;
use std::time::Duration;

/// Default update endpoint base URL.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3001";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Transport configuration.
///
/// # Environment Variables
///
/// - `FIELDSYNC_ENDPOINT`: base URL the fixed `/update` path is joined to
/// - `FIELDSYNC_TIMEOUT_MS`: per-request timeout in milliseconds
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the collaborator hosting the update endpoint
    pub endpoint: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl SyncConfig {
    /// Build configuration from the environment, falling back to defaults
    /// for anything absent or unparseable.
    pub fn from_env() -> Self {
        let endpoint = env::var("FIELDSYNC_ENDPOINT")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_ms = env::var("FIELDSYNC_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        Self {
            endpoint,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Configuration pointing at a specific endpoint, default timeout.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }
}
