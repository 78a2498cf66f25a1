//! Tunable game configuration.
//!
//! Defaults come from the constants in `memory-tiles-types`; a JSON file may
//! override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::*;

/// Timing and limits used by the board engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub flip_speed: f32,
    pub flip_back_delay: f32,
    pub combo_display_seconds: f32,
    pub max_combo_multiplier: u32,
    pub initial_hints: u32,
    pub hint_cooldown_seconds: f32,
    pub hint_display_seconds: f32,
    pub shuffle_start_interval: f32,
    pub shuffle_move_duration: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            flip_speed: FLIP_ANIMATION_SPEED,
            flip_back_delay: FLIP_BACK_DELAY,
            combo_display_seconds: COMBO_DISPLAY_SECONDS,
            max_combo_multiplier: MAX_COMBO_MULTIPLIER,
            initial_hints: INITIAL_HINTS,
            hint_cooldown_seconds: HINT_COOLDOWN_SECONDS,
            hint_display_seconds: HINT_DISPLAY_SECONDS,
            shuffle_start_interval: SHUFFLE_START_INTERVAL,
            shuffle_move_duration: SHUFFLE_MOVE_DURATION,
        }
    }
}

/// Point values applied by the score tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub match_points: i32,
    pub mismatch_penalty: i32,
    pub hint_penalty: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            match_points: MATCH_POINTS,
            mismatch_penalty: MISMATCH_PENALTY,
            hint_penalty: HINT_PENALTY,
        }
    }
}

/// Where the board sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub hud_margin: f32,
    pub padding: f32,
}

impl LayoutConfig {
    /// Area available to the grid (screen minus the HUD strip).
    pub fn board_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            self.hud_margin,
            self.screen_width,
            (self.screen_height - self.hud_margin).max(0.0),
        )
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            hud_margin: HUD_MARGIN,
            padding: TILE_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub scoring: ScoringRules,
    pub layout: LayoutConfig,
    pub difficulty: Difficulty,
    pub seed: u32,
    pub high_score_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            scoring: ScoringRules::default(),
            layout: LayoutConfig::default(),
            difficulty: Difficulty::default(),
            seed: 1,
            high_score_path: PathBuf::from(HIGH_SCORE_FILE),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.board.flip_back_delay, FLIP_BACK_DELAY);
        assert_eq!(cfg.scoring.match_points, 10);
        assert_eq!(cfg.scoring.mismatch_penalty, 4);
        assert_eq!(cfg.high_score_path, PathBuf::from("assets/highscore.txt"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json_str(
            r#"{ "difficulty": "hard", "seed": 42, "board": { "initial_hints": 1 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.board.initial_hints, 1);
        assert_eq!(cfg.board.flip_speed, FLIP_ANIMATION_SPEED);
        assert_eq!(cfg.scoring, ScoringRules::default());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = GameConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_board_bounds_reserve_hud() {
        let layout = LayoutConfig::default();
        let b = layout.board_bounds();
        assert_eq!(b.y, HUD_MARGIN);
        assert_eq!(b.height, SCREEN_HEIGHT - HUD_MARGIN);
    }
}
