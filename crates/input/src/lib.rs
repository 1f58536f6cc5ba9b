//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. Gravity ticks
//! are never produced here; the driver loop issues those on its own cadence.

pub mod map;

pub use nanotris_types as types;

pub use map::{handle_key_event, should_quit};
