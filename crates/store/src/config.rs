//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::Settings;

pub const DEFAULT_SCORE_PATH: &str = "score.json";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub score_path: PathBuf,
    pub seed: u64,
    pub flash_effect: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            score_path: PathBuf::from(DEFAULT_SCORE_PATH),
            seed: clock_seed(),
            flash_effect: true,
            log_path: None,
        }
    }
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the process environment in `from_env`)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let score_path = non_empty("BLOCKS_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE_PATH));

        let seed = non_empty("BLOCKS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let flash_effect = non_empty("BLOCKS_FLASH")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(true);

        let log_path = non_empty("BLOCKS_LOG_PATH").map(PathBuf::from);

        Self {
            score_path,
            seed,
            flash_effect,
            log_path,
        }
    }

    /// Startup settings
    pub fn settings(&self) -> Settings {
        Settings {
            flash_effect: self.flash_effect,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
