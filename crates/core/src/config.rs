//! Game configuration
//!
//! Dimensions are the only real configuration of the engine. They are read
//! leniently: missing or unparsable values fall back to the defaults, and the
//! playfield clamps anything below 10.

use crate::types::{DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Where new pieces appear horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnColumn {
    /// Anchor at `columns / 2`
    #[default]
    Center,
    /// Anchor at `random(columns - 4) + 2`
    Random,
}

impl SpawnColumn {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "center" => Some(SpawnColumn::Center),
            "random" => Some(SpawnColumn::Random),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub spawn: SpawnColumn,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            spawn: SpawnColumn::Center,
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub fn with_spawn(self, spawn: SpawnColumn) -> Self {
        Self { spawn, ..self }
    }

    /// Create from environment variables
    ///
    /// `NANOTRIS_ROWS`, `NANOTRIS_COLUMNS`, `NANOTRIS_SPAWN` (`center` | `random`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let rows = lookup("NANOTRIS_ROWS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.rows);

        let columns = lookup("NANOTRIS_COLUMNS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.columns);

        let spawn = lookup("NANOTRIS_SPAWN")
            .and_then(|s| SpawnColumn::from_str(&s))
            .unwrap_or(defaults.spawn);

        Self {
            rows,
            columns,
            spawn,
        }
    }
}
