//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: `(BOARD_WIDTH / 2 - shape_width / 2, 0)`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame clock interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Gravity: one row every 500ms |
//! | `FLASH_DURATION_MS` | 150 | Each on/off phase of the row flash |
//! | `FLASH_TIMES` | 2 | Number of flash cycles per clear |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{Color, Screen, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Color::Cyan.rgb(), (0, 255, 255));
//! assert_eq!(Screen::default(), Screen::Start);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame clock interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval: the falling piece drops one row every 500ms
pub const FALL_INTERVAL_MS: u32 = 500;

/// Points awarded per cleared row (flat, no level or combo multipliers)
pub const LINE_CLEAR_BONUS: u32 = 100;

/// Duration of each on/off phase of the row flash animation
pub const FLASH_DURATION_MS: u32 = 150;

/// Number of on/off flash cycles played per line clear
pub const FLASH_TIMES: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_timing_defaults() {
        assert_eq!(FALL_INTERVAL_MS, 500);
        assert_eq!(LINE_CLEAR_BONUS, 100);
        assert_eq!(FLASH_DURATION_MS, 150);
        assert_eq!(FLASH_TIMES, 2);
    }

    #[test]
    fn test_palette_has_seven_distinct_colors() {
        for (i, a) in Color::ALL.iter().enumerate() {
            for b in &Color::ALL[i + 1..] {
                assert_ne!(a, b);
                assert_ne!(a.rgb(), b.rgb());
            }
        }
    }

    #[test]
    fn test_empty_cell_differs_from_every_color() {
        let empty: Cell = None;
        for color in Color::ALL {
            assert_ne!(empty, Some(color));
        }
    }
}

/// The seven tetromino shapes of the catalog
///
/// - **I**: 1x4 bar
/// - **T**: 2x3, stem pointing down
/// - **S**: 2x3
/// - **Z**: 2x3 (mirror of S)
/// - **O**: 2x2 square
/// - **L**: 2x3, foot on the left
/// - **J**: 2x3, foot on the right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    T,
    S,
    Z,
    O,
    L,
    J,
}

impl ShapeKind {
    /// All shapes, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
    ];
}

/// Occupied-cell palette
///
/// Colors are drawn independently of the shape, so an `I` can be red and an `O`
/// can be cyan. The empty cell is not a color: see [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Orange,
    Green,
    Red,
    Blue,
    Purple,
    Yellow,
}

impl Color {
    /// The full palette, in draw order
    pub const ALL: [Color; 7] = [
        Color::Cyan,
        Color::Orange,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::Purple,
        Color::Yellow,
    ];

    /// 24-bit RGB value used by renderers
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Orange => (255, 165, 0),
            Color::Green => (0, 255, 0),
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Purple => (128, 0, 128),
            Color::Yellow => (255, 255, 0),
        }
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell occupied by a locked block of that color
///
/// The empty sentinel can never compare equal to an occupied color, whatever
/// the color renders as.
pub type Cell = Option<Color>;

/// Which screen the game is on
///
/// The game starts on [`Screen::Start`]. The flow is
/// `Start → Playing ↔ Paused`, `Playing → GameOver → Playing | Start`,
/// and `Paused → Start` when a run is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Start,
    Playing,
    Paused,
    GameOver,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Playing => "playing",
            Screen::Paused => "paused",
            Screen::GameOver => "gameOver",
        }
    }
}

/// Discrete commands consumed by the game state machine
///
/// Key bindings are a front-end concern; see the input crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down
    SoftDrop,
    /// Rotate piece 90° clockwise (reverted if blocked)
    Rotate,
    /// Pause while playing, resume while paused
    Pause,
    /// Exit from the start screen, back to the start screen elsewhere
    Quit,
    /// Start a run from the start screen
    Play,
    /// Start a new run from the game-over screen
    Restart,
    /// Delete the persisted high score (start screen only)
    ResetHighScore,
    /// Turn the row flash animation on or off (start screen only)
    ToggleFlashEffect,
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::Pause,
        Command::Quit,
        Command::Play,
        Command::Restart,
        Command::ResetHighScore,
        Command::ToggleFlashEffect,
    ];
}
