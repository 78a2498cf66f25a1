//! Hint subsystem state.
//!
//! A hint reveals one genuine pair for a short time. Uses are limited per game
//! and separated by a cooldown. The board owns the tiles; this module only keeps
//! the bookkeeping and the pair search.

use crate::tile::Tile;

#[derive(Debug, Clone, PartialEq)]
pub struct HintState {
    remaining: u32,
    cooldown: f32,
    pair: Option<(usize, usize)>,
    display: f32,
    auto_flip_back: bool,
}

impl HintState {
    pub fn new(uses: u32) -> Self {
        Self {
            remaining: uses,
            cooldown: 0.0,
            pair: None,
            display: 0.0,
            auto_flip_back: false,
        }
    }

    /// Uses left and not cooling down.
    pub fn can_use(&self) -> bool {
        self.remaining > 0 && self.cooldown <= 0.0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn pair(&self) -> Option<(usize, usize)> {
        self.pair
    }

    /// A hinted pair is currently shown.
    pub fn is_active(&self) -> bool {
        self.pair.is_some()
    }

    /// Clicks are refused until the hinted pair has been turned back.
    pub fn blocks_clicks(&self) -> bool {
        self.pair.is_some() && self.auto_flip_back
    }

    /// The display time ran out and the pair should be turned back.
    pub fn is_expired(&self) -> bool {
        self.pair.is_some() && self.auto_flip_back && self.display <= 0.0
    }

    pub fn is_hinted(&self, index: usize) -> bool {
        matches!(self.pair, Some((a, b)) if a == index || b == index)
    }

    /// Record a hint use for `pair`.
    pub fn begin(&mut self, pair: (usize, usize), display: f32, cooldown: f32) {
        self.pair = Some(pair);
        self.display = display;
        self.remaining = self.remaining.saturating_sub(1);
        self.cooldown = cooldown;
        self.auto_flip_back = true;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
        if self.display > 0.0 {
            self.display = (self.display - dt).max(0.0);
        }
    }

    /// Forget the shown pair. Uses and cooldown are untouched.
    pub fn clear(&mut self) {
        self.pair = None;
        self.display = 0.0;
        self.auto_flip_back = false;
    }
}

/// First genuine pair among face-down tiles, in collection order.
///
/// For the first face-down tile that has a face-down partner later in the
/// collection, returns that tile and its first such partner.
pub fn find_pair(tiles: &[Tile]) -> Option<(usize, usize)> {
    for (i, a) in tiles.iter().enumerate() {
        if !a.is_face_down() {
            continue;
        }
        let partner = tiles
            .iter()
            .enumerate()
            .skip(i + 1)
            .find(|(_, b)| b.is_face_down() && b.key() == a.key());
        if let Some((j, _)) = partner {
            return Some((i, j));
        }
    }
    None
}
