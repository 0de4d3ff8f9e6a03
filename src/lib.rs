//! TUI Blocks (workspace facade crate).
//!
//! This package exposes `tui_blocks::{core,input,store,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_blocks_core as core;
pub use tui_blocks_input as input;
pub use tui_blocks_store as store;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;
