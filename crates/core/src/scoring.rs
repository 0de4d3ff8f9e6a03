//! Scoring - flat per-row bonus and high-score comparison

use crate::types::LINE_CLEAR_BONUS;

/// Points for clearing `rows` rows in a single lock
///
/// # Examples
///
/// ```
/// use tui_blocks_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 100);
/// assert_eq!(line_clear_score(4), 400);
/// ```
pub fn line_clear_score(rows: usize) -> u32 {
    (rows as u32).saturating_mul(LINE_CLEAR_BONUS)
}

/// A finished run only replaces the stored high score when strictly greater
pub fn beats_high_score(score: u32, stored: u32) -> bool {
    score > stored
}
