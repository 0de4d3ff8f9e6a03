//! Line clearing - full-row detection and gravity compaction of locked cells
//!
//! Full rows are found by scanning bottom to top. Every surviving block then
//! drops by the number of full rows that were *below* it in the original
//! layout. The shifted map is built fresh in a single pass, so shift amounts
//! always come from the original rows and no block can be moved twice.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::locked::LockedCells;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Row indices of full rows, bottom to top
pub type ClearedRows = ArrayVec<i8, { BOARD_HEIGHT as usize }>;

/// Presentation request emitted when rows clear with the flash effect enabled
///
/// `grid` is the grid as it looked before the rows were removed, so the
/// animation can highlight the rows in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashEvent {
    pub rows: ClearedRows,
    pub grid: Grid,
}

/// Outcome of one [`clear_lines`] call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    pub rows: ClearedRows,
    pub flash: Option<FlashEvent>,
}

impl LineClear {
    /// Number of rows cleared
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Check if every column of row `y` holds a locked block
pub fn is_row_full(locked: &LockedCells, y: i8) -> bool {
    (0..BOARD_WIDTH as i8).all(|x| locked.contains(x, y))
}

/// Full rows, scanned from the bottom row up
pub fn find_full_rows(locked: &LockedCells) -> ClearedRows {
    (0..BOARD_HEIGHT as i8)
        .rev()
        .filter(|&y| is_row_full(locked, y))
        .collect()
}

/// Remove full rows and drop the blocks above them
///
/// When `flash_enabled` is set and at least one row is full, the result carries
/// a [`FlashEvent`] captured before any mutation. The flash has no effect on the
/// resulting map.
pub fn clear_lines(locked: &mut LockedCells, flash_enabled: bool) -> LineClear {
    let rows = find_full_rows(locked);
    if rows.is_empty() {
        return LineClear::default();
    }

    let flash = flash_enabled.then(|| FlashEvent {
        rows: rows.clone(),
        grid: Grid::build(locked),
    });

    let compacted: LockedCells = locked
        .iter()
        .filter(|&((_, y), _)| !rows.contains(&y))
        .map(|((x, y), color)| ((x, y + shift_for(y, &rows)), color))
        .collect();
    *locked = compacted;

    LineClear { rows, flash }
}

/// Number of cleared rows below row `y`
#[inline]
fn shift_for(y: i8, rows: &[i8]) -> i8 {
    rows.iter().filter(|&&row| y < row).count() as i8
}
