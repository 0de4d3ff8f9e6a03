//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] for the screen
//! that is currently showing. The game core never sees raw key events.

pub mod map;

pub use tui_blocks_types as types;

pub use map::{handle_key_event, should_quit};
