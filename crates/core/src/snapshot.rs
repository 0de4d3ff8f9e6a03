use crate::grid::Grid;
use crate::piece::{Piece, PieceCells};
use crate::types::{Color, Screen};

/// Occupied cells and color of the falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub cells: PieceCells,
    pub color: Color,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            cells: value.cells(),
            color: value.color,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub screen: Screen,
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<PieceCells>,
    pub score: u32,
    pub high_score: u32,
    pub flash_effect: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            screen: Screen::Start,
            grid: Grid::new(),
            active: None,
            ghost: None,
            score: 0,
            high_score: 0,
            flash_effect: true,
        }
    }
}
