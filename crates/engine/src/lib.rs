//! Automated play on top of the core board.
//!
//! The [`Autoplayer`] only looks at [`BoardSnapshot`](memory_tiles_core::BoardSnapshot)s,
//! the same surface a renderer gets, and answers with a click point.

pub mod autoplayer;

pub use autoplayer::{Autoplayer, PickError};
