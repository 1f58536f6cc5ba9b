//! Shapes module - the immutable piece catalog
//!
//! Every shape is a set of 4x4 rotation bitmaps. A bitmap is four rows of a
//! 4-bit mask: row 0 is the topmost row, bit 3 is the leftmost column and bit
//! 0 the rightmost. Relative to a piece anchor `(col, row)`, bitmap row `i`
//! lands on playfield row `row + 1 - i` and mask bits 3..0 land on columns
//! `col - 2`, `col - 1`, `col`, `col + 1`.

use crate::types::{Color, ShapeKind, SHAPE_COUNT};

/// One rotation state: four rows of a 4-bit mask, top row first
pub type Bitmap = [u8; 4];

/// Immutable shape descriptor
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    rotations: &'static [Bitmap],
    elongated: bool,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Display color, nonzero
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Number of rotation states (1, 2 or 4)
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// All rotation bitmaps, rotation 0 first
    pub fn rotations(&self) -> &'static [Bitmap] {
        self.rotations
    }

    /// Bitmap for a rotation index, `None` if the index is out of range
    pub fn bitmap(&self, rotation: usize) -> Option<&'static Bitmap> {
        self.rotations.get(rotation)
    }

    /// Rotation index that follows `rotation`, wrapping around
    pub fn next_rotation(&self, rotation: usize) -> usize {
        (rotation + 1) % self.rotations.len()
    }

    /// True only for the 4-long straight piece (eligible for a 2-column kick)
    pub fn is_elongated(&self) -> bool {
        self.elongated
    }
}

const O_ROTATIONS: [Bitmap; 1] = [[0, 6, 6, 0]];

const I_ROTATIONS: [Bitmap; 2] = [[0, 15, 0, 0], [2, 2, 2, 2]];

const S_ROTATIONS: [Bitmap; 2] = [[0, 3, 6, 0], [2, 3, 1, 0]];

const Z_ROTATIONS: [Bitmap; 2] = [[0, 6, 3, 0], [1, 3, 2, 0]];

const J_ROTATIONS: [Bitmap; 4] = [[0, 7, 1, 0], [3, 2, 2, 0], [4, 7, 0, 0], [2, 2, 6, 0]];

const L_ROTATIONS: [Bitmap; 4] = [[0, 7, 4, 0], [2, 2, 3, 0], [1, 7, 0, 0], [6, 2, 2, 0]];

const T_ROTATIONS: [Bitmap; 4] = [[0, 7, 2, 0], [2, 3, 2, 0], [2, 7, 0, 0], [2, 6, 2, 0]];

/// The catalog, indexed in selection order
static CATALOG: [Shape; SHAPE_COUNT] = [
    Shape {
        kind: ShapeKind::O,
        rotations: &O_ROTATIONS,
        elongated: false,
    },
    Shape {
        kind: ShapeKind::I,
        rotations: &I_ROTATIONS,
        elongated: true,
    },
    Shape {
        kind: ShapeKind::S,
        rotations: &S_ROTATIONS,
        elongated: false,
    },
    Shape {
        kind: ShapeKind::Z,
        rotations: &Z_ROTATIONS,
        elongated: false,
    },
    Shape {
        kind: ShapeKind::J,
        rotations: &J_ROTATIONS,
        elongated: false,
    },
    Shape {
        kind: ShapeKind::L,
        rotations: &L_ROTATIONS,
        elongated: false,
    },
    Shape {
        kind: ShapeKind::T,
        rotations: &T_ROTATIONS,
        elongated: false,
    },
];

/// Descriptor for a selection index (reduced mod 7)
pub fn shape_at(index: u32) -> &'static Shape {
    get_shape(ShapeKind::from_index(index))
}

/// Descriptor for a kind
pub fn get_shape(kind: ShapeKind) -> &'static Shape {
    &CATALOG[kind.index()]
}

/// Playfield cells covered by `bitmap` anchored at `(col, row)`
///
/// Yields `(col, row)` pairs in scan order: bitmap rows top to bottom, and
/// within a row from the most to the least significant bit. Cells may lie
/// outside the playfield.
pub fn bitmap_cells(bitmap: &Bitmap, col: i32, row: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
    bitmap.iter().enumerate().flat_map(move |(i, &mask)| {
        let yy = row + 1 - i as i32;
        (0..4).filter_map(move |bit| {
            if mask & (0x8u8 >> bit) != 0 {
                Some((col - 2 + bit, yy))
            } else {
                None
            }
        })
    })
}
