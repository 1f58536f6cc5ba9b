//! Shared types module - vocabulary used by the engine, hosts and drivers
//!
//! Everything in here is plain data with no dependencies, so the same
//! definitions compile for a desktop terminal host and for a bare-metal
//! target without an allocator.
//!
//! # Playfield Dimensions
//!
//! - **Minimum**: 10 rows x 10 columns (smaller requests are clamped up)
//! - **Default**: 20 rows x 10 columns
//! - Row 0 is the bottom row; row indices grow upward
//!
//! # Level and Gravity
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_LEVEL` | 1 | Level at game start |
//! | `MAX_LEVEL` | 10 | Level reached after 91 completions |
//! | `LINES_PER_LEVEL` | 10 | Completions needed per level step |
//! | `GRAVITY_CEILING` | 11 | Gravity factor is `GRAVITY_CEILING - level` |
//! | `GRAVITY_STEP_MS` | 50 | Milliseconds per gravity factor unit |
//!
//! # Examples
//!
//! ```
//! use nanotris_types::{ShapeKind, MIN_ROWS};
//!
//! assert_eq!(ShapeKind::from_index(1), ShapeKind::I);
//! assert_eq!(ShapeKind::T.color(), 7);
//! assert_eq!(MIN_ROWS, 10);
//! ```

/// Smallest number of rows a playfield is allowed to have
pub const MIN_ROWS: usize = 10;

/// Smallest number of columns a playfield is allowed to have
pub const MIN_COLUMNS: usize = 10;

/// Default playfield height
pub const DEFAULT_ROWS: usize = 20;

/// Default playfield width
pub const DEFAULT_COLUMNS: usize = 10;

/// Number of distinct shapes in the catalog
pub const SHAPE_COUNT: usize = 7;

/// Level at the start of every game
pub const MIN_LEVEL: u8 = 1;

/// Highest reachable level
pub const MAX_LEVEL: u8 = 10;

/// Row completions needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity factor base; the driver waits `(GRAVITY_CEILING - level) * GRAVITY_STEP_MS`
pub const GRAVITY_CEILING: u32 = 11;

/// Milliseconds per gravity factor unit
pub const GRAVITY_STEP_MS: u32 = 50;

/// Score awarded for every touchdown
pub const TOUCHDOWN_POINTS: u32 = 1;

/// Cell value stored in the playfield: 0 is empty, anything else is a shape color
pub type Color = u8;

/// Value of an empty cell
pub const EMPTY: Color = 0;

/// The seven shapes, in catalog selection order
///
/// Selection index and display color follow this order:
/// O=0/1, I=1/2, S=2/3, Z=3/4, J=4/5, L=5/6, T=6/7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    O,
    I,
    S,
    Z,
    J,
    L,
    T,
}

impl ShapeKind {
    /// All kinds in selection order
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::O,
        ShapeKind::I,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::T,
    ];

    /// Map any selection index onto a kind (reduced mod 7)
    ///
    /// ```
    /// use nanotris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_index(0), ShapeKind::O);
    /// assert_eq!(ShapeKind::from_index(6), ShapeKind::T);
    /// assert_eq!(ShapeKind::from_index(8), ShapeKind::I);
    /// ```
    pub fn from_index(index: u32) -> Self {
        Self::ALL[index as usize % SHAPE_COUNT]
    }

    /// Position of this kind in selection order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Display color written into the playfield
    pub fn color(&self) -> Color {
        self.index() as Color + 1
    }
}

/// Outcome of testing a bitmap against the playfield
///
/// - **Succeeded**: every covered cell is free (or above the field)
/// - **Failed**: a covered cell is occupied, or below the floor
/// - **StickoutLeft** / **StickoutRight**: a covered column is off the field
/// - **InvalidInput**: no bitmap was supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Succeeded,
    Failed,
    StickoutLeft,
    StickoutRight,
    InvalidInput,
}

impl Placement {
    pub fn is_success(&self) -> bool {
        matches!(self, Placement::Succeeded)
    }
}

/// Discrete notifications sent to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// The next piece could not be placed at its spawn position
    GameOver,
    /// The active piece landed and was committed to the playfield
    Touchdown,
    /// One or more rows were completed and removed in a single step
    RowCompleted,
    /// The level changed after a row completion
    LevelChanged,
}

/// Player and driver intents accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move the active piece one column left
    MoveLeft,
    /// Move the active piece one column right
    MoveRight,
    /// Advance to the next rotation, with wall-kick correction
    Rotate,
    /// Hard drop: step gravity until the piece lands
    Drop,
    /// One gravity step
    Tick,
    /// Toggle pause
    Pause,
    /// Start (or restart) a game
    Start,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_colors_follow_selection_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(kind.color(), i as Color + 1);
            assert_ne!(kind.color(), EMPTY);
        }
    }

    #[test]
    fn gravity_constants() {
        assert_eq!(GRAVITY_CEILING, 11);
        assert_eq!(GRAVITY_STEP_MS, 50);
        assert!(MIN_LEVEL < MAX_LEVEL);
    }
}
