//! Data Models
//!
//! This module contains the core data structures for inline-edit
//! synchronization:
//!
//! - Field identity and capture types (`Binding`, `FieldRef`, `EditIntent`)
//! - The surface model replacing the rendered page (`Surface`, widgets)
//! - Wire types for the update endpoint (`UpdateRequest`, `UpdateAck`)

mod field;
mod surface;
mod wire;

pub use field::{Binding, EditIntent, FieldRef};
pub use surface::{BackButton, EditSession, SelectWidget, Surface, TextWidget, Widget};
pub use wire::{UpdateAck, UpdateRequest};
