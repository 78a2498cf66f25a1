use serde::Serialize;

use crate::types::{Rect, TileFace};

/// What a renderer needs to draw one tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileView {
    pub index: usize,
    pub key: u32,
    pub bounds: Rect,
    pub face: TileFace,
    /// Horizontal scale of the flip animation, `1.0` when at rest.
    pub scale_x: f32,
    pub shows_front: bool,
    pub selected: bool,
    pub hinted: bool,
    pub moving: bool,
}

/// Read-only board state for rendering and the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<TileView>,
    pub matches_found: u32,
    pub pair_count: usize,
    pub combo_count: u32,
    pub combo_multiplier: u32,
    pub combo_display_time: f32,
    pub hints_remaining: u32,
    pub hint_cooldown: f32,
    pub hint_active: bool,
    pub shuffling: bool,
    pub shuffle_progress: f32,
    pub processing_match: bool,
    pub locked: bool,
    pub all_matched: bool,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        *self = Self {
            tiles: std::mem::take(&mut self.tiles),
            ..Self::default()
        };
        self.tiles.clear();
    }

    /// Player input would be accepted right now.
    pub fn playable(&self) -> bool {
        !self.locked && !self.all_matched
    }

    /// Tiles that can still be clicked.
    pub fn face_down(&self) -> impl Iterator<Item = &TileView> + '_ {
        self.tiles.iter().filter(|t| t.face == TileFace::FaceDown)
    }
}
