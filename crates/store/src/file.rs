//! JSON file backed high-score store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::HighScoreStore;

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub high_score: u32,
}

/// High score persisted as `{"high_score": N}` at a fixed path
///
/// The file is read when the store is opened and again on `refresh`; in between
/// the cached value is served. Every `save`/`reset` goes straight to disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    cached: u32,
}

impl JsonFileStore {
    /// Open the store, loading the current record (0 when absent or unreadable)
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = load_or_zero(&path);
        Self { path, cached }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        self.cached
    }

    fn refresh(&mut self) {
        self.cached = load_or_zero(&self.path);
    }

    fn save(&mut self, score: u32) {
        self.cached = score;
        let record = HighScoreRecord { high_score: score };
        match write_record(&self.path, &record) {
            Ok(()) => info!("saved high score {} to {}", score, self.path.display()),
            Err(err) => warn!("failed to save high score: {:#}", err),
        }
    }

    fn reset(&mut self) {
        self.cached = 0;
        match fs::remove_file(&self.path) {
            Ok(()) => info!("removed high score file {}", self.path.display()),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(
                "failed to remove high score file {}: {}",
                self.path.display(),
                err
            ),
        }
    }
}

fn load_or_zero(path: &Path) -> u32 {
    match read_record(path) {
        Ok(Some(record)) => record.high_score,
        Ok(None) => 0,
        Err(err) => {
            warn!("ignoring high score file {}: {:#}", path.display(), err);
            0
        }
    }
}

/// Read the record at `path`; `Ok(None)` when the file does not exist
pub fn read_record(path: &Path) -> Result<Option<HighScoreRecord>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };
    let record = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(record))
}

/// Write the record through a sibling temp file and rename it into place
pub fn write_record(path: &Path, record: &HighScoreRecord) -> Result<()> {
    let json = serde_json::to_string(record)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
