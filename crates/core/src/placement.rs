//! Placement validation and ghost projection
//!
//! A piece position is valid when every occupied cell has `0 <= x < BOARD_WIDTH`
//! and either sits above the grid (`y < 0`) or lands on an empty in-bounds
//! cell. Cells above the grid skip the occupancy check so pieces can spawn and
//! rotate while partly off the top edge.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Check whether `piece` fits on `grid` at its current anchor
pub fn is_valid(piece: &Piece, grid: &Grid) -> bool {
    piece
        .cells()
        .iter()
        .all(|&(x, y)| accepts_cell(grid, x, y))
}

#[inline]
fn accepts_cell(grid: &Grid, x: i8, y: i8) -> bool {
    if x < 0 || x >= BOARD_WIDTH as i8 {
        return false;
    }
    y < 0 || grid.is_empty(x, y)
}

/// Project `piece` straight down to its resting row
///
/// Steps down while the position stays valid, then backs up one row. The
/// result is a render-only copy; nothing is locked.
pub fn ghost(piece: &Piece, grid: &Grid) -> Piece {
    let mut ghost = *piece;
    while ghost.y < BOARD_HEIGHT as i8 && is_valid(&ghost, grid) {
        ghost.y += 1;
    }
    ghost.y -= 1;
    ghost
}
