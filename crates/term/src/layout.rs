//! Layout: maps playfield coordinates to terminal positions.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::types::{Color, EMPTY};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background of empty playfield cells
pub const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

/// Border and label color
pub const FRAME_FG: Rgb = Rgb::new(140, 140, 140);

/// Display color for a cell value (O, I, S, Z, J, L, T in color order)
pub fn palette(color: Color) -> Rgb {
    match color {
        EMPTY => FIELD_BG,
        1 => Rgb::new(240, 220, 80),
        2 => Rgb::new(80, 220, 220),
        3 => Rgb::new(100, 220, 120),
        4 => Rgb::new(220, 80, 80),
        5 => Rgb::new(80, 120, 220),
        6 => Rgb::new(255, 165, 0),
        7 => Rgb::new(200, 120, 220),
        _ => Rgb::new(200, 200, 200),
    }
}

/// Screen geometry of the playfield, preview box and status lines.
///
/// The field is drawn inside a one-character border with its top-left
/// corner at `origin`. Each cell is two terminal columns wide to compensate
/// for the usual glyph aspect ratio. Row 0 of the playfield is the bottom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub origin: (u16, u16),
    pub rows: u16,
    pub columns: u16,
    pub cell_w: u16,
}

impl Layout {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            origin: (2, 1),
            rows: rows as u16,
            columns: columns as u16,
            cell_w: 2,
        }
    }

    /// Outer width of the bordered field in terminal columns
    pub fn frame_width(&self) -> u16 {
        self.columns * self.cell_w + 2
    }

    /// Outer height of the bordered field in terminal rows
    pub fn frame_height(&self) -> u16 {
        self.rows + 2
    }

    /// Terminal position of a playfield cell, `None` if off the visible field
    pub fn cell(&self, col: i32, row: i32) -> Option<(u16, u16)> {
        if col < 0 || row < 0 || col >= self.columns as i32 || row >= self.rows as i32 {
            return None;
        }
        let x = self.origin.0 + 1 + col as u16 * self.cell_w;
        let y = self.origin.1 + 1 + (self.rows - 1 - row as u16);
        Some((x, y))
    }

    /// Top-left of the 4x4 preview box, right of the field
    pub fn preview_origin(&self) -> (u16, u16) {
        (self.origin.0 + self.frame_width() + 3, self.origin.1 + 2)
    }

    /// Terminal position of a preview cell (bitmap row `i`, bit column `bit`)
    pub fn preview_cell(&self, i: u16, bit: u16) -> (u16, u16) {
        let (x, y) = self.preview_origin();
        (x + bit * self.cell_w, y + i)
    }

    /// Position of the stats block (level/score/lines)
    pub fn stats_origin(&self) -> (u16, u16) {
        let (x, y) = self.preview_origin();
        (x, y + 6)
    }

    /// Line below the field used for messages and the latest log line
    pub fn status_line(&self) -> (u16, u16) {
        (self.origin.0, self.origin.1 + self.frame_height() + 1)
    }
}
