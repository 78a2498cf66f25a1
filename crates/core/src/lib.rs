//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the tile-matching rules and every piece of state they touch.
//! It has no dependency on a renderer, an input device or an audio backend:
//!
//! - **Deterministic**: the same seed produces the same deal and shuffle order
//! - **Frame driven**: all waiting is a countdown advanced by `update(dt)`
//! - **Headless**: render state is read through [`snapshot::BoardSnapshot`]
//!
//! # Module Structure
//!
//! - [`tile`]: a tile's flip state machine and its position tween
//! - [`board`]: the board engine (selection session, flip-back, combo)
//! - [`hint`] / [`shuffle`]: the two timed helpers owned by the board
//! - [`score`] / [`storage`]: running score and the persisted high score
//! - [`game`]: wiring of board events into scoring and sound cues
//!
//! # Example
//!
//! ```
//! use memory_tiles_core::{Board, BoardConfig, ClickOutcome, GridLayout};
//! use memory_tiles_core::types::Rect;
//!
//! let layout = GridLayout::fit(2, 2, Rect::new(0.0, 0.0, 400.0, 400.0), 10.0);
//! let mut board = Board::with_keys(layout, vec![0, 0, 1, 1], BoardConfig::default(), 1).unwrap();
//!
//! let first = board.tiles()[0].bounds().center();
//! let second = board.tiles()[1].bounds().center();
//! board.handle_click(first);
//! assert!(matches!(board.handle_click(second), ClickOutcome::Matched { .. }));
//! assert_eq!(board.matches_found(), 1);
//! ```

pub mod board;
pub mod config;
pub mod cues;
pub mod error;
pub mod game;
pub mod hint;
pub mod layout;
pub mod rng;
pub mod score;
pub mod shuffle;
pub mod snapshot;
pub mod storage;
pub mod tile;

pub use memory_tiles_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClickOutcome, IgnoreReason};
pub use config::{BoardConfig, GameConfig, LayoutConfig, ScoringRules};
pub use cues::{CueCounter, NoCues, SoundCues};
pub use error::{BoardError, ConfigError, StorageError};
pub use game::Game;
pub use layout::{grid_dimensions, GridLayout};
pub use rng::SimpleRng;
pub use score::ScoreTracker;
pub use snapshot::{BoardSnapshot, TileView};
pub use storage::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use tile::Tile;
