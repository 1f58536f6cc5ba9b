//! Level module - level progression and gravity cadence
//!
//! Level is a pure function of the number of row completions. The gravity
//! interval is driver policy: the engine only reports the level and the driver
//! decides how long to wait between ticks.

use crate::types::{GRAVITY_CEILING, GRAVITY_STEP_MS, LINES_PER_LEVEL, MAX_LEVEL, MIN_LEVEL};

/// Level for a cumulative completion count
///
/// 0 → 1, 1..=10 → 1, 11..=20 → 2, ..., 81..=90 → 9, 91+ → 10.
pub fn level_for_lines(lines: u32) -> u8 {
    if lines == 0 {
        return MIN_LEVEL;
    }
    let level = 1 + (lines - 1) / LINES_PER_LEVEL;
    level.min(MAX_LEVEL as u32) as u8
}

/// Delay between gravity ticks for a level, in milliseconds
///
/// Level 1 waits 500ms, level 10 waits 50ms. Levels outside 1..=10 are clamped.
pub fn gravity_interval_ms(level: u8) -> u32 {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL) as u32;
    (GRAVITY_CEILING - level) * GRAVITY_STEP_MS
}
