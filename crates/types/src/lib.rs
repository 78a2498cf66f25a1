//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data, usable from the matching engine, the autoplayer,
//! and whatever renderer sits on top.
//!
//! # Timing Constants
//!
//! All timing values are in seconds (the engine is driven with `update(dt)`):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_SECONDS` | 1/60 | Fixed timestep used by the headless runner |
//! | `FLIP_ANIMATION_SPEED` | 8.0 | Flip progress per second (a flip takes 0.125s) |
//! | `FLIP_BACK_DELAY` | 1.0 | Time a mismatched pair stays visible |
//! | `COMBO_DISPLAY_SECONDS` | 1.5 | How long the combo banner stays up |
//! | `HINT_DISPLAY_SECONDS` | 1.5 | How long a hinted pair stays revealed |
//! | `HINT_COOLDOWN_SECONDS` | 10.0 | Cooldown between hints |
//! | `SHUFFLE_START_INTERVAL` | 0.02 | Stagger between tiles starting to move |
//! | `SHUFFLE_MOVE_DURATION` | 0.45 | Duration of a single tile move |
//!
//! # Scoring
//!
//! - A match scores `MATCH_POINTS * min(combo, MAX_COMBO_MULTIPLIER)`
//! - A mismatch costs `MISMATCH_PENALTY` (the score may go negative)
//! - A hint costs `HINT_PENALTY`
//!
//! # Examples
//!
//! ```
//! use memory_tiles_types::{Difficulty, Rect, Vec2, TileFace};
//!
//! let difficulty = Difficulty::from_str("medium").unwrap();
//! assert_eq!(difficulty.grid(), (6, 6));
//! assert_eq!(difficulty.pair_count(), 18);
//!
//! let r = Rect::new(10.0, 10.0, 40.0, 60.0);
//! assert!(r.contains(Vec2::new(50.0, 70.0)));
//! assert!(!r.contains(Vec2::new(51.0, 70.0)));
//!
//! assert!(TileFace::Matched.is_revealed());
//! assert!(TileFace::FlippingUp.is_animating());
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep used by the headless runner (60 FPS)
pub const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// Flip animation progress per second.
pub const FLIP_ANIMATION_SPEED: f32 = 8.0;

/// Delay before a mismatched pair is turned back face down.
pub const FLIP_BACK_DELAY: f32 = 1.0;

/// How long the combo counter stays on screen after a match.
pub const COMBO_DISPLAY_SECONDS: f32 = 1.5;

/// Cap for the combo score multiplier.
pub const MAX_COMBO_MULTIPLIER: u32 = 5;

/// Hints available at the start of each game.
pub const INITIAL_HINTS: u32 = 3;

/// Cooldown between two hints.
pub const HINT_COOLDOWN_SECONDS: f32 = 10.0;

/// How long a hinted pair stays face up before flipping back.
pub const HINT_DISPLAY_SECONDS: f32 = 1.5;

/// Stagger between consecutive tiles starting their shuffle move.
pub const SHUFFLE_START_INTERVAL: f32 = 0.02;

/// Duration of a single tile's shuffle move.
pub const SHUFFLE_MOVE_DURATION: f32 = 0.45;

/// Default duration requested for a shuffle by the runner.
pub const DEFAULT_SHUFFLE_SECONDS: f32 = 1.0;

/// Base points for a match (multiplied by the combo multiplier).
pub const MATCH_POINTS: i32 = 10;

/// Points lost on a mismatch.
pub const MISMATCH_PENALTY: i32 = 4;

/// Points lost when a hint is used (same path as a mismatch).
pub const HINT_PENALTY: i32 = 4;

/// Well-known location of the persisted high score.
pub const HIGH_SCORE_FILE: &str = "assets/highscore.txt";

/// Default screen extent the board is laid out in.
pub const SCREEN_WIDTH: f32 = 1024.0;
pub const SCREEN_HEIGHT: f32 = 768.0;

/// Space reserved above the board for the HUD.
pub const HUD_MARGIN: f32 = 80.0;

/// Gap between tiles.
pub const TILE_PADDING: f32 = 10.0;

/// Tile aspect ratio (width / height).
pub const TILE_ASPECT: f32 = 2.0 / 3.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(FLIP_ANIMATION_SPEED, 8.0);
        assert_eq!(FLIP_BACK_DELAY, 1.0);
        assert_eq!(SHUFFLE_START_INTERVAL, 0.02);
        assert_eq!(SHUFFLE_MOVE_DURATION, 0.45);
        // A flip must settle well before the flip-back fires.
        assert!(1.0 / FLIP_ANIMATION_SPEED < FLIP_BACK_DELAY);
        assert!(HINT_DISPLAY_SECONDS < HINT_COOLDOWN_SECONDS);
    }

    #[test]
    fn scoring_defaults() {
        assert_eq!(MATCH_POINTS, 10);
        assert_eq!(MISMATCH_PENALTY, 4);
        assert_eq!(HINT_PENALTY, MISMATCH_PENALTY);
        assert_eq!(MAX_COMBO_MULTIPLIER, 5);
    }

    #[test]
    fn difficulty_grids_are_even() {
        for d in Difficulty::ALL {
            let (rows, cols) = d.grid();
            assert_eq!((rows * cols) % 2, 0, "{:?}", d);
            assert_eq!(d.pair_count() * 2, rows * cols);
        }
    }

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_string(&BoardEvent::PairMatched {
            key: 3,
            multiplier: 2,
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"pair_matched","key":3,"multiplier":2}"#);

        let back: BoardEvent = serde_json::from_str(r#"{"event":"shuffle_finished"}"#).unwrap();
        assert_eq!(back, BoardEvent::ShuffleFinished);
    }

    #[test]
    fn rect_edges_are_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(!r.contains(Vec2::new(-0.1, 5.0)));
        assert_eq!(r.center(), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn vec2_lerp() {
        let a = Vec2::new(0.0, 10.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 5.0));
    }
}

/// A 2D point or extent in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `to` by `t` (unclamped).
    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// Axis-aligned rectangle (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Point-in-rect test; all four edges count as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Visual state of a tile.
///
/// The cycle is `FaceDown → FlippingUp → FaceUp → FlippingDown → FaceDown`.
/// `Matched` can be entered from any other state and is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileFace {
    FaceDown,
    FlippingUp,
    FaceUp,
    FlippingDown,
    Matched,
}

impl TileFace {
    /// Face up for gameplay purposes (`FaceUp` or `Matched`).
    pub fn is_revealed(self) -> bool {
        matches!(self, TileFace::FaceUp | TileFace::Matched)
    }

    /// Mid-flip in either direction.
    pub fn is_animating(self) -> bool {
        matches!(self, TileFace::FlippingUp | TileFace::FlippingDown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileFace::FaceDown => "face_down",
            TileFace::FlippingUp => "flipping_up",
            TileFace::FaceUp => "face_up",
            TileFace::FlippingDown => "flipping_down",
            TileFace::Matched => "matched",
        }
    }
}

/// Board size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 4x4 grid, 8 pairs
    #[default]
    Easy,
    /// 6x6 grid, 18 pairs
    Medium,
    /// 8x8 grid, 32 pairs
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Grid dimensions as `(rows, cols)`.
    pub fn grid(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (4, 4),
            Difficulty::Medium => (6, 6),
            Difficulty::Hard => (8, 8),
        }
    }

    pub fn tile_count(self) -> usize {
        let (rows, cols) = self.grid();
        rows * cols
    }

    pub fn pair_count(self) -> usize {
        self.tile_count() / 2
    }

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_tiles_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("nightmare"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Shared, read-only description of the tile back artwork.
///
/// One instance is created per board and handed to every tile, so a renderer can
/// resolve the back texture once instead of per tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardBack {
    pub name: String,
}

impl CardBack {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for CardBack {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Engine-side event recorded by the board.
///
/// Drained by the game wiring and forwarded to the score tracker and sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    /// A tile started flipping face up (player click or hint).
    TileRevealed { index: usize },
    /// Two selected tiles shared a key and are now matched.
    PairMatched { key: u32, multiplier: u32 },
    /// Two selected tiles did not match.
    PairMismatched,
    /// A hint revealed a genuine pair.
    HintShown { first: usize, second: usize },
    ShuffleStarted { tiles: usize },
    ShuffleFinished,
}
