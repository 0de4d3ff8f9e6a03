//! High-score store seam
//!
//! The game only needs three operations on the persisted high score. Stores
//! must never fail outward: an unreadable record loads as 0 and a failed write
//! is dropped.

/// Scoped access to the single persisted high score
pub trait HighScoreStore {
    /// Stored high score, or 0 when absent or unreadable
    fn load(&self) -> u32;

    /// Overwrite the stored high score
    fn save(&mut self, score: u32);

    /// Forget the stored high score
    fn reset(&mut self);

    /// Pick up changes made outside the game since the last read
    fn refresh(&mut self) {}
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: Option<u32>,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `score`
    pub fn with_high_score(score: u32) -> Self {
        Self {
            high_score: Some(score),
            saves: 0,
        }
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.high_score.unwrap_or(0)
    }

    fn save(&mut self, score: u32) {
        self.high_score = Some(score);
        self.saves += 1;
    }

    fn reset(&mut self) {
        self.high_score = None;
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) {
        (**self).save(score)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn refresh(&mut self) {
        (**self).refresh()
    }
}
