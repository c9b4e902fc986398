//! Field Identity and Edit Capture
//!
//! This module defines the types that tie a rendered widget to a persisted
//! value and capture an in-flight change to that value.
//!
//! # Architecture
//!
//! - **Binding**: the raw identity attributes as carried by a widget. Either
//!   attribute may be missing; widgets without a full identity are
//!   interactive but never synchronized.
//! - **FieldRef**: a resolved, guaranteed non-empty (record id, field name)
//!   pair. Only a `FieldRef` can address the update endpoint.
//! - **EditIntent**: an ephemeral captured change. Created when an editing
//!   session ends (or a selection changes), consumed exactly once by the
//!   update dispatcher, then discarded. Never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity attributes carried by a widget, as found on the rendered page.
///
/// Both attributes are optional: the page is free to render interactive
/// widgets that are not backed by a persisted record. `resolve()` is the
/// single place that decides whether a widget participates in
/// synchronization.
///
/// # Examples
///
/// ```rust
/// use fieldsync_core::models::Binding;
///
/// let bound = Binding::new("550e8400-e29b-41d4-a716-446655440000", "status");
/// assert!(bound.resolve().is_some());
///
/// let unbound = Binding::default();
/// assert!(unbound.resolve().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Opaque stable record identifier (commonly a UUID string)
    pub record_id: Option<String>,

    /// Field name within the record
    pub field_name: Option<String>,
}

impl Binding {
    /// Create a binding with both identity attributes present.
    pub fn new(record_id: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            field_name: Some(field_name.into()),
        }
    }

    /// Resolve the binding into a full field identity.
    ///
    /// Returns `None` unless both attributes are present and non-empty.
    /// An empty string counts as absent; whitespace is preserved and does
    /// not count as empty.
    pub fn resolve(&self) -> Option<FieldRef> {
        match (self.record_id.as_deref(), self.field_name.as_deref()) {
            (Some(record_id), Some(field_name))
                if !record_id.is_empty() && !field_name.is_empty() =>
            {
                Some(FieldRef {
                    record_id: record_id.to_string(),
                    field_name: field_name.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// A resolved (record id, field name) pair identifying one persisted value.
///
/// Invariant: both components are non-empty. Construction goes through
/// [`Binding::resolve`] so the invariant holds everywhere a `FieldRef`
/// appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRef {
    /// Opaque stable record identifier
    pub record_id: String,

    /// Field name within the record
    pub field_name: String,
}

/// A captured, about-to-be-sent change to a single field's value.
///
/// Lifecycle: created at commit time, handed to the update dispatcher,
/// consumed exactly once, discarded. `old_value` is `None` on paths that do
/// not track the prior value (selection changes and the back-flush).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditIntent {
    /// Identity of the field being updated
    pub field: FieldRef,

    /// Value before the edit, when the originating path tracks it
    pub old_value: Option<String>,

    /// Value to persist
    pub new_value: String,

    /// When the change was captured. Used for outcome-latency logging only.
    pub captured_at: DateTime<Utc>,
}

impl EditIntent {
    /// Capture a change to `field`, stamping the capture time.
    pub fn new(field: FieldRef, old_value: Option<String>, new_value: impl Into<String>) -> Self {
        Self {
            field,
            old_value,
            new_value: new_value.into(),
            captured_at: Utc::now(),
        }
    }
}
