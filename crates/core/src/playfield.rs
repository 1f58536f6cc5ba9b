//! Playfield module - the grid of settled cells
//!
//! The playfield is a `rows x columns` grid stored as one flat row-major buffer.
//! Coordinates: column 0 is the left edge, row 0 is the BOTTOM row and row
//! indices grow upward. Anything at row >= `rows` is open space above the
//! stack; anything at row < 0 is the floor.
//!
//! The grid is never smaller than 10x10; smaller requests are clamped.

use std::fmt;

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::shapes::{bitmap_cells, Bitmap};
use crate::types::{Color, Placement, EMPTY, MIN_COLUMNS, MIN_ROWS};

/// Row indices recorded by [`Playfield::completed_rows`], highest index first
pub type CompletedRows = ArrayVec<usize, 4>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    rows: usize,
    columns: usize,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Color>,
}

impl Playfield {
    /// Create an empty playfield, clamping each dimension to at least 10
    pub fn new(rows: usize, columns: usize) -> Self {
        let rows = rows.max(MIN_ROWS);
        let columns = columns.max(MIN_COLUMNS);
        Self {
            rows,
            columns,
            cells: vec![EMPTY; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.columns || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.columns + col as usize)
    }

    /// Cell value at `(col, row)`, `None` if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Color> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(c) if c != EMPTY)
    }

    /// One row as a slice, bottom row is 0
    pub fn row(&self, row: usize) -> Option<&[Color]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Flat view of every cell, row-major from the bottom row
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Test a single cell for placement
    ///
    /// Columns are checked first so a piece hanging off a side always reports
    /// which side, even when it is also below the floor.
    pub fn test_cell(&self, col: i32, row: i32) -> Placement {
        if col < 0 {
            return Placement::StickoutLeft;
        }
        if col as usize >= self.columns {
            return Placement::StickoutRight;
        }
        if row < 0 {
            return Placement::Failed;
        }
        if row as usize >= self.rows {
            return Placement::Succeeded;
        }
        if self.is_occupied(col, row) {
            Placement::Failed
        } else {
            Placement::Succeeded
        }
    }

    /// Test whether `bitmap` fits with its anchor at `(col, row)`
    ///
    /// Returns the first non-success found scanning bitmap rows top to bottom
    /// and bits from most to least significant. `None` yields
    /// [`Placement::InvalidInput`].
    pub fn placement_test(&self, bitmap: Option<&Bitmap>, col: i32, row: i32) -> Placement {
        let Some(bitmap) = bitmap else {
            return Placement::InvalidInput;
        };

        bitmap_cells(bitmap, col, row)
            .map(|(x, y)| self.test_cell(x, y))
            .find(|res| !res.is_success())
            .unwrap_or(Placement::Succeeded)
    }

    /// Test the piece's current bitmap at its own anchor shifted by `(dc, dr)`
    pub fn test_piece(&self, piece: &Piece, dc: i32, dr: i32) -> Placement {
        self.placement_test(Some(piece.bitmap()), piece.col + dc, piece.row + dr)
    }

    /// Write the piece's color into every covered cell
    ///
    /// The placement is not re-validated; covered cells outside the grid are
    /// skipped.
    pub fn occupy(&mut self, piece: &Piece) {
        let color = piece.color();
        for (col, row) in piece.cells() {
            if let Some(idx) = self.index(col, row) {
                self.cells[idx] = color;
            }
        }
    }

    /// Check if a row counts as complete
    ///
    /// Every cell except the one in the last column must be filled; the last
    /// column is not inspected.
    pub fn is_row_complete(&self, row: usize) -> bool {
        match self.row(row) {
            Some(cells) => cells[..self.columns - 1].iter().all(|&c| c != EMPTY),
            None => false,
        }
    }

    /// Completed rows, scanned from the highest row index down to 0
    ///
    /// At most four rows are recorded. Clearing them in the returned order
    /// keeps the remaining indices valid, because clearing a row only moves
    /// rows above it.
    pub fn completed_rows(&self) -> CompletedRows {
        let mut completed = CompletedRows::new();
        for row in (0..self.rows).rev() {
            if self.is_row_complete(row) && completed.try_push(row).is_err() {
                break;
            }
        }
        completed
    }

    /// Remove a row: every row above moves down by one and the top row is emptied
    pub fn clear_row(&mut self, row: usize) {
        if row >= self.rows {
            return;
        }

        let width = self.columns;
        // copy_within handles the overlapping ranges
        self.cells
            .copy_within((row + 1) * width..self.rows * width, row * width);

        let top = (self.rows - 1) * width;
        self.cells[top..].fill(EMPTY);
    }

    /// Empty the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Overwrite a cell, returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, color: Color) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }
}

/// Text dump, top row first: `#` for occupied, `.` for empty
impl fmt::Display for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            let start = row * self.columns;
            for &cell in &self.cells[start..start + self.columns] {
                f.write_str(if cell == EMPTY { "." } else { "#" })?;
            }
            if row > 0 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
