//! Service Layer Error Types
//!
//! Error types for the update transport and its configuration. Failures are
//! terminal at the point of occurrence: callers log them, nothing retries
//! and nothing rolls back.

use thiserror::Error;

/// Synchronization errors.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The HTTP request never completed (connection, DNS, timeout)
    #[error("update request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered, but the body was not a readable ack
    #[error("update endpoint returned an unreadable response: {0}")]
    MalformedResponse(String),

    /// Transport configuration was rejected at construction
    #[error("invalid sync configuration: {0}")]
    InvalidConfig(String),
}

impl SyncError {
    /// Create a malformed response error
    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
