//! Store module - persisted high score and runtime configuration
//!
//! The high score lives in a small JSON file holding a single record:
//!
//! ```json
//! {"high_score": 1200}
//! ```
//!
//! [`JsonFileStore`] implements [`core::HighScoreStore`]. It never fails
//! outward: a missing or corrupt file loads as 0 and write failures are logged
//! and dropped, so the game keeps running on a read-only disk.
//!
//! # Environment Variables
//!
//! [`Config::from_env`] reads:
//!
//! - `BLOCKS_SCORE_PATH`: High-score file (default: "score.json")
//! - `BLOCKS_SEED`: Piece generator seed (default: derived from the clock)
//! - `BLOCKS_FLASH`: Set to "0" or "false" to start with the flash effect off
//! - `BLOCKS_LOG_PATH`: Write logs to this file (default: logging off)

pub mod config;
pub mod file;

pub use tui_blocks_core as core;

pub use config::Config;
pub use file::{HighScoreRecord, JsonFileStore};
