//! Piece module - tetromino shape matrices and rotation
//!
//! A piece is a small 0/1 shape matrix anchored at its top-left corner in grid
//! space. Rotation rewrites the matrix itself ("reverse the rows, then
//! transpose") and leaves the anchor where it is, so non-square shapes drift
//! around as they turn. There are no kick tables: callers that find a rotated
//! piece blocked simply rotate it back.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::locked::Coord;
use crate::types::{Color, ShapeKind, BOARD_WIDTH};

/// Largest supported shape matrix side
pub const MAX_SHAPE_DIM: usize = 4;

/// Upper bound on occupied cells in any shape matrix
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Occupied grid cells of a piece, row-major
pub type PieceCells = ArrayVec<Coord, MAX_PIECE_CELLS>;

type Bits = [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

/// Rectangular 0/1 matrix marking the occupied sub-cells of a piece
///
/// Bits outside `rows x cols` are always false, so derived equality compares
/// matrix content only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: Bits,
}

impl Shape {
    /// Build a shape from a literal 0/1 matrix
    ///
    /// ```
    /// use tui_blocks_core::piece::Shape;
    ///
    /// let t = Shape::from_matrix([[1, 1, 1], [0, 1, 0]]);
    /// assert_eq!((t.rows(), t.cols()), (2, 3));
    /// assert!(t.is_filled(1, 1));
    /// ```
    pub const fn from_matrix<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut i = 0;
        while i < R {
            let mut j = 0;
            while j < C {
                bits[i][j] = matrix[i][j] != 0;
                j += 1;
            }
            i += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    /// Build a shape from raw bits, rejecting bad dimensions and empty matrices
    ///
    /// Bits outside `rows x cols` are ignored.
    pub fn from_bits(rows: u8, cols: u8, bits: Bits) -> Option<Self> {
        let dims = 1..=MAX_SHAPE_DIM as u8;
        if !dims.contains(&rows) || !dims.contains(&cols) {
            return None;
        }
        let mut masked = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in masked.iter_mut().enumerate().take(rows as usize) {
            row[..cols as usize].copy_from_slice(&bits[i][..cols as usize]);
        }
        let shape = Self {
            rows,
            cols,
            bits: masked,
        };
        (shape.offsets().count() > 0).then_some(shape)
    }

    /// Catalog shape for a kind, in spawn orientation
    pub const fn of(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::I => Self::from_matrix([[1, 1, 1, 1]]),
            ShapeKind::T => Self::from_matrix([[1, 1, 1], [0, 1, 0]]),
            ShapeKind::S => Self::from_matrix([[1, 1, 0], [0, 1, 1]]),
            ShapeKind::Z => Self::from_matrix([[0, 1, 1], [1, 1, 0]]),
            ShapeKind::O => Self::from_matrix([[1, 1], [1, 1]]),
            ShapeKind::L => Self::from_matrix([[1, 1, 1], [1, 0, 0]]),
            ShapeKind::J => Self::from_matrix([[1, 1, 1], [0, 0, 1]]),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether sub-cell (row `i`, column `j`) is occupied
    pub fn is_filled(&self, i: usize, j: usize) -> bool {
        i < self.rows as usize && j < self.cols as usize && self.bits[i][j]
    }

    /// 90° clockwise: `new[i][j] = old[rows - 1 - j][i]`
    pub fn rotated(&self) -> Self {
        let (rows, cols) = (self.rows as usize, self.cols as usize);
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in bits.iter_mut().enumerate().take(cols) {
            for (j, bit) in row.iter_mut().enumerate().take(rows) {
                *bit = self.bits[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Occupied `(row, col)` offsets, row-major
    pub fn offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows as usize).flat_map(move |i| {
            (0..self.cols as usize)
                .filter(move |&j| self.bits[i][j])
                .map(move |j| (i, j))
        })
    }
}

/// A falling piece (or its ghost): shape, color, and top-left anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` at the spawn position
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self::with_shape(Shape::of(kind), color)
    }

    /// Create a piece with an arbitrary shape at the spawn position
    ///
    /// The anchor is horizontally centered: `BOARD_WIDTH / 2 - cols / 2`.
    pub fn with_shape(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    /// Spawn a random piece
    ///
    /// Shape and color are drawn independently and uniformly from `rng`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
        let color = Color::ALL[rng.random_range(0..Color::ALL.len())];
        Self::new(kind, color)
    }

    /// Occupied grid cells: `(x + j, y + i)` for every filled `(i, j)`
    pub fn cells(&self) -> PieceCells {
        self.shape
            .offsets()
            .map(|(i, j)| (self.x + j as i8, self.y + i as i8))
            .collect()
    }

    /// Rotate the shape 90° clockwise in place; the anchor does not move
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated();
    }

    /// Move the anchor without any validation
    pub fn shift(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }
}

fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.cols / 2) as i8
}
