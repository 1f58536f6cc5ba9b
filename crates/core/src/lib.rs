//! Core engine - playfield, pieces and the game state machine
//!
//! This crate contains every game rule and nothing else: no display, no
//! input, no clock. The embedding environment implements [`Host`] and drives
//! the engine by calling intents and [`Game::tick`] on its own cadence, which
//! keeps the same engine usable in a terminal and on a microcontroller.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven immutable shapes and their rotation bitmaps
//! - [`piece`]: a shape placed at an anchor with a rotation index
//! - [`playfield`]: occupancy grid, placement tests, row completion
//! - [`game`]: the engine state machine (move, rotate, drop, tick)
//! - [`host`]: the embedder capability trait and a headless implementation
//! - [`level`]: level progression and gravity cadence
//! - [`config`]: playfield dimensions and spawn policy
//! - [`rng`]: deterministic LCG for hosts without entropy
//!
//! # Game Rules
//!
//! - Pieces spawn at the top row and fall one row per tick
//! - A rotation that pushes the piece off a side is corrected by one column,
//!   or two for the I piece; collisions are never corrected
//! - A row counts as complete when every column but the last is filled
//! - Each touchdown scores one point; each step that completes rows adds one
//!   to the completion count, and every ten completions raise the level
//!
//! # Example
//!
//! ```
//! use nanotris_core::{Game, GameConfig, GameStatus, HeadlessHost};
//!
//! let mut host = HeadlessHost::new(12345);
//! let mut game = Game::new(&mut host, GameConfig::default());
//!
//! let level = game.start();
//! assert_eq!(level, 1);
//!
//! game.move_left();
//! game.rotate();
//! game.drop();
//!
//! assert_eq!(game.score(), 1);
//! assert_eq!(game.status(), GameStatus::Running);
//! ```

pub mod config;
pub mod game;
pub mod host;
pub mod level;
pub mod piece;
pub mod playfield;
pub mod rng;
pub mod shapes;

pub use nanotris_types as types;

// Re-export commonly used types for convenience
pub use config::{GameConfig, SpawnColumn};
pub use game::{Game, GameStatus};
pub use host::{HeadlessHost, Host};
pub use level::{gravity_interval_ms, level_for_lines};
pub use piece::Piece;
pub use playfield::{CompletedRows, Playfield};
pub use rng::SimpleRng;
pub use shapes::{bitmap_cells, get_shape, shape_at, Bitmap, Shape};
