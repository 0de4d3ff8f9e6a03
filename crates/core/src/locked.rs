//! Locked cells - blocks that can no longer move
//!
//! Locked cells are stored as a sparse map from `(x, y)` to color instead of a
//! dense grid. The render grid is derived from this map every tick (see
//! [`crate::grid::Grid::build`]), and the line-clear engine re-keys it.

use std::collections::HashMap;

use crate::types::Color;

/// Grid coordinate `(x, y)`: x grows to the right, y grows downwards
pub type Coord = (i8, i8);

/// Sparse map of locked blocks, keyed by grid coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedCells {
    cells: HashMap<Coord, Color>,
}

impl LockedCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a block at `(x, y)`, returning the color it replaced (if any)
    pub fn insert(&mut self, x: i8, y: i8, color: Color) -> Option<Color> {
        self.cells.insert((x, y), color)
    }

    pub fn get(&self, x: i8, y: i8) -> Option<Color> {
        self.cells.get(&(x, y)).copied()
    }

    pub fn contains(&self, x: i8, y: i8) -> bool {
        self.cells.contains_key(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Iterate all locked blocks in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.cells.iter().map(|(&coord, &color)| (coord, color))
    }
}

impl FromIterator<(Coord, Color)> for LockedCells {
    fn from_iter<T: IntoIterator<Item = (Coord, Color)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
