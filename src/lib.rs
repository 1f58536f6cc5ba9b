//! nanotris (workspace facade crate).
//!
//! Re-exports the engine and its terminal embedding under one name so the
//! demo binary, integration tests and benches share a single import path.
//! The implementation lives in dedicated crates under `crates/`.

pub use nanotris_core as core;
pub use nanotris_input as input;
pub use nanotris_term as term;
pub use nanotris_types as types;
