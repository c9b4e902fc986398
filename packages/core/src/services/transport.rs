//! Update Transport
//!
//! The single outbound channel for field updates. Every sub-protocol
//! (dropdown sync, inline text edits, the back-flush) funnels through one
//! [`UpdateTransport`] implementation.
//!
//! The trait exists so the controller can be exercised against recording or
//! failing transports in tests; production wiring uses
//! [`HttpUpdateTransport`] against the page's update endpoint.

use async_trait::async_trait;

use crate::config::SyncConfig;
use crate::models::{UpdateAck, UpdateRequest};
use crate::services::error::SyncError;

/// Fixed path of the update endpoint, relative to the configured base URL.
pub const UPDATE_PATH: &str = "/update";

/// One-shot delivery of a field update.
///
/// Implementations report the server's verdict as an [`UpdateAck`] and
/// reserve `Err` for deliveries where no verdict was obtained at all.
#[async_trait]
pub trait UpdateTransport: Send + Sync {
    /// Deliver one update and return the server's ack.
    async fn send(&self, request: UpdateRequest) -> Result<UpdateAck, SyncError>;
}

/// HTTP implementation posting JSON to `<endpoint>/update`.
pub struct HttpUpdateTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUpdateTransport {
    /// Build a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] for an empty endpoint, or
    /// [`SyncError::Http`] if the underlying HTTP client cannot be
    /// constructed with the configured timeout.
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        if config.endpoint.trim().is_empty() {
            return Err(SyncError::invalid_config("endpoint must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.endpoint.trim_end_matches('/'), UPDATE_PATH),
        })
    }

    /// Full URL updates are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl UpdateTransport for HttpUpdateTransport {
    /// The response body is parsed as an ack regardless of HTTP status: a
    /// rejection arrives as a well-formed `{"success": false}` body, not as
    /// a status code. Bodies that do not decode are a transport failure.
    async fn send(&self, request: UpdateRequest) -> Result<UpdateAck, SyncError> {
        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();

        response.json::<UpdateAck>().await.map_err(|err| {
            SyncError::malformed_response(format!("status {status}: {err}"))
        })
    }
}
