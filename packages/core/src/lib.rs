//! FieldSync Core Synchronization Layer
//!
//! This crate implements inline-edit synchronization for record pages
//! rendered by an external collaborator: dropdown selections persist
//! immediately, display text becomes editable in place, and a back control
//! flushes pending dropdown values before navigating through history.
//!
//! # Architecture
//!
//! - **Explicit surface model**: every editable element maps to one widget
//!   state record carrying its own identity; the visual layer is a pure
//!   projection of this model
//! - **Single outbound channel**: all three sub-protocols funnel through one
//!   update transport posting to the fixed `/update` path
//! - **Fire and forget**: deliveries run as detached tasks; failures are
//!   logged and counted, never retried or rolled back
//!
//! # Modules
//!
//! - [`models`] - Surface, widget, identity, and wire types
//! - [`services`] - Controller, dispatcher, transport, lifecycle events
//! - [`config`] - Transport configuration from the environment
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use fieldsync_core::{
//!     Binding, EditController, History, HttpUpdateTransport, InputEvent,
//!     SelectWidget, Surface, SyncConfig,
//! };
//!
//! struct BrowserHistory;
//!
//! impl History for BrowserHistory {
//!     fn back(&self, steps: u32) {
//!         // hand off to the host page
//!     }
//! }
//!
//! # fn main() -> Result<(), fieldsync_core::SyncError> {
//! let mut surface = Surface::new();
//! surface.push(SelectWidget::new(
//!     "status-select",
//!     Binding::new("550e8400-e29b-41d4-a716-446655440000", "status"),
//!     "Open",
//! ));
//!
//! let transport = Arc::new(HttpUpdateTransport::new(&SyncConfig::from_env())?);
//! let mut controller = EditController::new(surface, transport, Arc::new(BrowserHistory));
//!
//! // Inside a Tokio runtime: relay page events, apply the returned effects.
//! let effects = controller.handle(InputEvent::Change {
//!     target: "status-select".to_string(),
//!     value: "Done".to_string(),
//! });
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::SyncConfig;
pub use models::*;
pub use services::*;
