//! Error types. Only construction and I/O can fail; gameplay never does.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Caller bugs detected while building a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    EmptyGrid,

    #[error("a {rows}x{cols} grid has an odd number of tiles")]
    OddTileCount { rows: usize, cols: usize },

    #[error("expected {expected} pair keys, got {actual}")]
    KeyCountMismatch { expected: usize, actual: usize },

    #[error("pair key {key} appears {count} times (must be exactly 2)")]
    UnpairedKey { key: u32, count: usize },

    #[error("board config field `{field}` is out of range")]
    InvalidConfig { field: &'static str },
}

/// High-score persistence faults. Always recovered by the score tracker.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("high score file {path} does not contain a number: {raw:?}")]
    Parse { path: PathBuf, raw: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing config: {0}")]
    Json(#[from] serde_json::Error),
}
