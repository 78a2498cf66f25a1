//! Memory tiles (workspace facade crate).
//!
//! Exposes the implementation crates under `crates/` as
//! `memory_tiles::{core, engine, types}`.

pub use memory_tiles_core as core;
pub use memory_tiles_engine as engine;
pub use memory_tiles_types as types;
