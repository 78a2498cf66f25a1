//! High-score persistence.
//!
//! The stored value is a single integer in a plain text file so it stays
//! human-editable. Missing storage is not an error (`Ok(None)`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

pub trait HighScoreStore {
    /// Read the stored high score, `Ok(None)` if nothing has been stored yet.
    fn load(&self) -> Result<Option<i32>, StorageError>;

    fn save(&mut self, score: i32) -> Result<(), StorageError>;

    /// Human-readable location for log lines.
    fn describe(&self) -> String;
}

/// Plain-text file store.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse the first whitespace-separated token as an integer.
pub fn parse_high_score(raw: &str) -> Option<i32> {
    raw.split_whitespace().next()?.parse().ok()
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<Option<i32>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        parse_high_score(&raw).map(Some).ok_or_else(|| StorageError::Parse {
            path: self.path.clone(),
            raw: raw.trim().chars().take(32).collect(),
        })
    }

    fn save(&mut self, score: i32) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        fs::write(&self.path, score.to_string()).map_err(io_err)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store (tests, sessions that should not persist).
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Option<i32>,
}

impl MemoryHighScoreStore {
    pub fn new(value: Option<i32>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> Option<i32> {
        self.value
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<Option<i32>, StorageError> {
        Ok(self.value)
    }

    fn save(&mut self, score: i32) -> Result<(), StorageError> {
        self.value = Some(score);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
