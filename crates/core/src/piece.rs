//! Piece module - a shape placed at an anchor with a rotation

use crate::shapes::{bitmap_cells, get_shape, Bitmap, Shape};
use crate::types::{Color, ShapeKind};

/// A piece instance: shape, rotation index and anchor
///
/// The rotation index is always valid for the shape; it is only changed
/// through [`Piece::rotated`], which wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: &'static Shape,
    rotation: usize,
    pub col: i32,
    pub row: i32,
}

impl Piece {
    /// Create a piece in rotation 0 at the given anchor
    pub fn new(kind: ShapeKind, col: i32, row: i32) -> Self {
        Self::from_shape(get_shape(kind), col, row)
    }

    pub fn from_shape(shape: &'static Shape, col: i32, row: i32) -> Self {
        Self {
            shape,
            rotation: 0,
            col,
            row,
        }
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn color(&self) -> Color {
        self.shape.color()
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Bitmap of the current rotation
    pub fn bitmap(&self) -> &'static Bitmap {
        &self.shape.rotations()[self.rotation]
    }

    /// Copy of this piece advanced to the next rotation
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.shape.next_rotation(self.rotation),
            ..*self
        }
    }

    /// Copy of this piece moved by `(dc, dr)`
    pub fn shifted(&self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
            ..*self
        }
    }

    /// Playfield cells covered in the current rotation (may be off-field)
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + 'static {
        bitmap_cells(self.bitmap(), self.col, self.row)
    }
}
