//! Edit Lifecycle Events
//!
//! Events emitted by the controller as editing sessions resolve. They follow
//! the observer pattern over tokio's broadcast channel so the projection
//! layer (or any other subscriber) can react to commits without coupling to
//! controller internals.
//!
//! Events describe outcomes on the outbound channel, not raw input: a
//! subscriber sees what was sent, what was suppressed, and what was flushed.

use crate::models::FieldRef;

/// Broadcast channel capacity for edit events.
///
/// Edits are human-paced; 64 leaves ample headroom for a burst flush while
/// keeping the channel small. Lagging subscribers only miss history, never
/// current surface state.
pub(crate) const EDIT_EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events emitted as edits resolve.
#[derive(Debug, Clone)]
pub enum EditEvent {
    /// A dropdown selection was dispatched to the update endpoint
    SelectionCommitted { field: FieldRef, value: String },

    /// A text editing session ended with a dispatched update
    TextCommitted {
        field: FieldRef,
        old_value: String,
        new_value: String,
    },

    /// A text editing session ended without a network call, either because
    /// the value was unchanged or the widget carries no identity
    EditSuppressed { widget_id: String },

    /// A back-flush issued its updates; navigation follows immediately
    FlushDispatched { requests: usize, steps: u32 },
}

impl EditEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &str {
        match self {
            EditEvent::SelectionCommitted { .. } => "edit:selection-committed",
            EditEvent::TextCommitted { .. } => "edit:text-committed",
            EditEvent::EditSuppressed { .. } => "edit:suppressed",
            EditEvent::FlushDispatched { .. } => "edit:flush-dispatched",
        }
    }
}
