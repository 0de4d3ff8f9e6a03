//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the falling-block rules, state management, and
//! simulation logic. It has no dependency on the terminal or the filesystem;
//! the high score is reached through the [`HighScoreStore`] trait.
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Portable**: Runs in the terminal front end or headless in tests
//!
//! # Module Structure
//!
//! - [`locked`]: Sparse map of locked blocks (the source of truth)
//! - [`grid`]: 10x20 dense grid rebuilt from the locked map
//! - [`piece`]: Shape matrices, rotation, and random spawning
//! - [`placement`]: Placement validation and ghost projection
//! - [`line_clear`]: Full-row removal and gravity compaction
//! - [`scoring`]: Line-clear points and high-score comparison
//! - [`settings`]: Player-toggleable settings (flash effect)
//! - [`store`]: High-score persistence seam
//! - [`game_state`]: Screen state machine, gravity, locking, and spawning
//!
//! # Game Rules
//!
//! - **Spawning**: Shape and color are drawn independently and uniformly
//! - **Rotation**: Clockwise matrix rotation around a fixed anchor, no kicks
//! - **Gravity**: One row every 500ms; a piece that cannot fall locks
//! - **Scoring**: 100 points per cleared row
//! - **Game Over**: A newly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameState, MemoryStore};
//! use tui_blocks_core::types::{Command, Screen};
//!
//! let mut game = GameState::new(12345, MemoryStore::new());
//! assert_eq!(game.screen(), Screen::Start);
//!
//! game.apply_command(Command::Play);
//! assert_eq!(game.screen(), Screen::Playing);
//!
//! game.apply_command(Command::MoveRight);
//! game.tick(16);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity only advances on the playing screen.

pub mod game_state;
pub mod grid;
pub mod line_clear;
pub mod locked;
pub mod piece;
pub mod placement;
pub mod scoring;
pub mod settings;
pub mod snapshot;
pub mod store;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use game_state::GameState;
pub use grid::Grid;
pub use line_clear::{clear_lines, FlashEvent, LineClear};
pub use locked::{Coord, LockedCells};
pub use piece::{Piece, PieceCells, Shape};
pub use placement::{ghost, is_valid};
pub use scoring::{beats_high_score, line_clear_score};
pub use settings::Settings;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use store::{HighScoreStore, MemoryStore};
