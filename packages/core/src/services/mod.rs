//! Synchronization Services
//!
//! This module contains the protocol layer of the crate:
//!
//! - `EditController` - event routing for the three editing sub-protocols
//! - `UpdateDispatcher` - fire-and-forget delivery with outcome counters
//! - `UpdateTransport` - the outbound channel trait and its HTTP impl
//! - `EditEvent` - lifecycle events for projection-layer subscribers
//!
//! Services coordinate between the surface model and the update endpoint;
//! they own no state beyond the surface itself and the dispatch counters.

pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod transport;

pub use controller::{EditController, Effect, History, InputEvent};
pub use dispatcher::{DispatchMetrics, UpdateDispatcher};
pub use error::SyncError;
pub use events::EditEvent;
pub use transport::{HttpUpdateTransport, UpdateTransport, UPDATE_PATH};
