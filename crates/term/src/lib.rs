//! Terminal host module.
//!
//! A `crossterm` implementation of the engine's [`Host`](nanotris_core::Host)
//! interface. The engine tells the host exactly which cells changed (draw a
//! piece, erase a piece, repaint the field), so this host draws incrementally
//! with cursor moves instead of re-rendering whole frames.
//!
//! - [`layout`]: pure mapping from playfield cells to screen positions and colors
//! - [`host`]: [`TerminalHost`], which queues terminal commands and flushes them

pub mod host;
pub mod layout;

pub use nanotris_core as core;
pub use nanotris_types as types;

pub use host::TerminalHost;
pub use layout::{Layout, Rgb};
