//! Board engine - owns the tiles and runs the selection session
//!
//! The board is driven by exactly two entry points per frame: [`Board::update`]
//! with the elapsed time and [`Board::handle_click`] with a pointer position.
//! Hints and shuffles are triggered with [`Board::show_hint`] and
//! [`Board::start_shuffle`].
//!
//! Session flow:
//!
//! - `Idle` (nothing selected) -> `OneSelected` -> evaluation on the second pick
//! - match: both tiles are confirmed and the session clears immediately
//! - mismatch: the flip-back countdown runs, both tiles are hidden, session clears
//!
//! Selection and hint references are indices into the owned tile collection and
//! are dropped whenever the collection is rebuilt.
//!
//! Scoring and audio are not called from here. Every notable thing that happens
//! is queued as a [`BoardEvent`] and drained by the caller with
//! [`Board::take_events`].

use std::collections::BTreeMap;
use std::sync::Arc;

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::hint::{self, HintState};
use crate::layout::GridLayout;
use crate::rng::{deal_keys, SimpleRng};
use crate::shuffle::ShuffleScheduler;
use crate::snapshot::{BoardSnapshot, TileView};
use crate::tile::Tile;
use crate::types::{BoardEvent, CardBack, Rect, TileFace, Vec2};

/// Why a click did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Shuffling,
    Evaluating,
    HintShowing,
    NoTile,
    NotFaceDown,
    /// Set by the game wiring, never by the board itself.
    Paused,
    Finished,
}

/// Result of [`Board::handle_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    /// First pick of a session.
    Revealed { index: usize },
    Matched {
        first: usize,
        second: usize,
        key: u32,
        multiplier: u32,
    },
    Mismatched { first: usize, second: usize },
}

impl ClickOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ClickOutcome::Ignored(_))
    }
}

/// The tile grid plus selection, hint and shuffle state.
///
/// Events accumulate until [`Board::take_events`] drains them, so a caller
/// driving the board directly must drain once per frame. [`Board::redeal`]
/// discards anything left undrained.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    layout: GridLayout,
    slot_positions: Vec<Vec2>,
    tiles: Vec<Tile>,
    /// Slot currently owned by each tile.
    slots: Vec<usize>,
    back: Arc<CardBack>,
    rng: SimpleRng,

    selected: ArrayVec<usize, 2>,
    flip_back_timer: f32,
    processing_match: bool,

    matches_found: u32,
    combo_count: u32,
    combo_display: f32,

    hint: HintState,
    shuffle: ShuffleScheduler,
    /// Tiles caught mid-reveal by a shuffle; hidden once they settle.
    pending_hide: Vec<usize>,

    events: Vec<BoardEvent>,
}

impl Board {
    /// Build a board with a seeded random deal.
    pub fn new(layout: GridLayout, config: BoardConfig, seed: u32) -> Result<Self, BoardError> {
        check_grid(layout.rows, layout.cols)?;
        check_config(&config)?;
        let mut rng = SimpleRng::new(seed);
        let keys = deal_keys(layout.slot_count() / 2, &mut rng);
        Ok(Self::assemble(layout, config, keys, rng))
    }

    /// Build a board with an explicit key order (row-major).
    pub fn with_keys(
        layout: GridLayout,
        keys: Vec<u32>,
        config: BoardConfig,
        seed: u32,
    ) -> Result<Self, BoardError> {
        check_grid(layout.rows, layout.cols)?;
        check_keys(layout.slot_count(), &keys)?;
        check_config(&config)?;
        Ok(Self::assemble(layout, config, keys, SimpleRng::new(seed)))
    }

    fn assemble(layout: GridLayout, config: BoardConfig, keys: Vec<u32>, rng: SimpleRng) -> Self {
        let mut board = Self {
            config,
            layout,
            slot_positions: Vec::new(),
            tiles: Vec::new(),
            slots: Vec::new(),
            back: Arc::new(CardBack::default()),
            rng,
            selected: ArrayVec::new(),
            flip_back_timer: 0.0,
            processing_match: false,
            matches_found: 0,
            combo_count: 0,
            combo_display: 0.0,
            hint: HintState::new(config.initial_hints),
            shuffle: ShuffleScheduler::new(
                config.shuffle_start_interval,
                config.shuffle_move_duration,
            ),
            pending_hide: Vec::new(),
            events: Vec::new(),
        };
        board.place_tiles(keys);
        info!(
            rows = layout.rows,
            cols = layout.cols,
            pairs = layout.slot_count() / 2,
            "board dealt"
        );
        board
    }

    fn place_tiles(&mut self, keys: Vec<u32>) {
        self.slot_positions = self.layout.positions();
        self.tiles = keys
            .into_iter()
            .zip(self.slot_positions.iter())
            .map(|(key, &pos)| {
                Tile::with_flip_speed(
                    key,
                    pos,
                    self.layout.tile_size,
                    Arc::clone(&self.back),
                    self.config.flip_speed,
                )
            })
            .collect();
        self.slots = (0..self.tiles.len()).collect();
    }

    /// Replace the shared card back used by every tile.
    pub fn set_card_back(&mut self, back: CardBack) {
        self.back = Arc::new(back);
        for tile in &mut self.tiles {
            tile.set_back(Arc::clone(&self.back));
        }
    }

    /// Deal a fresh game on the same grid. All session, hint and shuffle state
    /// is dropped along with the old tiles.
    pub fn redeal(&mut self, seed: u32) {
        self.rng = SimpleRng::new(seed);
        let keys = deal_keys(self.layout.slot_count() / 2, &mut self.rng);
        self.clear_state();
        self.place_tiles(keys);
        info!(seed, "board redealt");
    }

    fn clear_state(&mut self) {
        self.selected.clear();
        self.flip_back_timer = 0.0;
        self.processing_match = false;
        self.matches_found = 0;
        self.combo_count = 0;
        self.combo_display = 0.0;
        self.hint = HintState::new(self.config.initial_hints);
        self.shuffle.finish();
        self.pending_hide.clear();
        self.events.clear();
    }

    // ---------------------------------------------------------------------
    // Frame driving
    // ---------------------------------------------------------------------

    pub fn update(&mut self, dt: f32) {
        for tile in &mut self.tiles {
            tile.update(dt);
        }

        if self.combo_display > 0.0 {
            self.combo_display = (self.combo_display - dt).max(0.0);
        }

        self.update_flip_back(dt);
        self.update_hint(dt);
        self.update_pending_hide();
        self.update_shuffle(dt);
    }

    fn update_flip_back(&mut self, dt: f32) {
        if !self.processing_match {
            return;
        }
        self.flip_back_timer = (self.flip_back_timer - dt).max(0.0);
        if self.flip_back_timer > 0.0 {
            return;
        }
        // Hide is only legal from FaceUp; wait for the reveal to finish.
        if self.selected.iter().any(|&i| self.tiles[i].is_animating()) {
            return;
        }

        if let [a, b] = self.selected[..] {
            if self.tiles[a].key() != self.tiles[b].key() {
                self.tiles[a].hide();
                self.tiles[b].hide();
                trace!(first = a, second = b, "mismatched pair flipped back");
            }
        }
        self.selected.clear();
        self.processing_match = false;
    }

    fn update_hint(&mut self, dt: f32) {
        self.hint.tick(dt);
        if !self.hint.is_expired() {
            return;
        }
        let Some((a, b)) = self.hint.pair() else {
            return;
        };
        if self.tiles[a].is_animating() || self.tiles[b].is_animating() {
            return;
        }
        for i in [a, b] {
            if !self.tiles[i].is_matched() {
                self.tiles[i].hide();
            }
        }
        self.hint.clear();
        trace!(first = a, second = b, "hint pair flipped back");
    }

    fn update_pending_hide(&mut self) {
        if self.pending_hide.is_empty() {
            return;
        }
        let tiles = &mut self.tiles;
        self.pending_hide.retain(|&i| {
            let tile = &mut tiles[i];
            if tile.is_animating() {
                return true;
            }
            tile.hide();
            false
        });
    }

    fn update_shuffle(&mut self, dt: f32) {
        if !self.shuffle.is_active() {
            return;
        }

        let duration = self.shuffle.move_duration();
        let tiles = &mut self.tiles;
        let slots = &mut self.slots;
        let positions = &self.slot_positions;
        self.shuffle.advance(dt, |tile, slot| {
            slots[tile] = slot;
            tiles[tile].move_to(positions[slot], duration);
        });

        if !self.shuffle.all_started() || !self.pending_hide.is_empty() {
            return;
        }
        let still_moving = self
            .tiles
            .iter()
            .any(|t| !t.is_matched() && t.is_moving());
        if !still_moving {
            self.shuffle.finish();
            self.events.push(BoardEvent::ShuffleFinished);
            info!("shuffle finished");
        }
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Why the board currently refuses clicks, if it does.
    pub fn lock_reason(&self) -> Option<IgnoreReason> {
        if self.shuffle.is_active() {
            Some(IgnoreReason::Shuffling)
        } else if self.processing_match {
            Some(IgnoreReason::Evaluating)
        } else if self.hint.blocks_clicks() {
            Some(IgnoreReason::HintShowing)
        } else {
            None
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_reason().is_some()
    }

    /// Index of the tile under `point`.
    pub fn tile_at(&self, point: Vec2) -> Option<usize> {
        self.tiles.iter().position(|t| t.contains_point(point))
    }

    pub fn handle_click(&mut self, point: Vec2) -> ClickOutcome {
        if let Some(reason) = self.lock_reason() {
            trace!(?reason, "click ignored");
            return ClickOutcome::Ignored(reason);
        }
        let Some(index) = self.tile_at(point) else {
            return ClickOutcome::Ignored(IgnoreReason::NoTile);
        };
        if !self.tiles[index].is_face_down() || self.selected.contains(&index) {
            return ClickOutcome::Ignored(IgnoreReason::NotFaceDown);
        }

        self.tiles[index].reveal();
        self.events.push(BoardEvent::TileRevealed { index });
        self.selected.push(index);

        if self.selected.len() == 2 {
            let (first, second) = (self.selected[0], self.selected[1]);
            return self.evaluate(first, second);
        }
        debug!(index, "first tile revealed");
        ClickOutcome::Revealed { index }
    }

    fn evaluate(&mut self, first: usize, second: usize) -> ClickOutcome {
        let key = self.tiles[first].key();
        if key == self.tiles[second].key() {
            self.matches_found += 1;
            self.combo_count += 1;
            self.combo_display = self.config.combo_display_seconds;
            let multiplier = self.combo_multiplier();

            self.tiles[first].confirm_match();
            self.tiles[second].confirm_match();
            self.selected.clear();
            self.events.push(BoardEvent::PairMatched { key, multiplier });
            debug!(first, second, key, combo = self.combo_count, multiplier, "pair matched");

            ClickOutcome::Matched {
                first,
                second,
                key,
                multiplier,
            }
        } else {
            self.reset_combo();
            self.flip_back_timer = self.config.flip_back_delay;
            self.processing_match = true;
            self.events.push(BoardEvent::PairMismatched);
            debug!(first, second, "pair mismatched");

            ClickOutcome::Mismatched { first, second }
        }
    }

    fn reset_combo(&mut self) {
        self.combo_count = 0;
        self.combo_display = 0.0;
    }

    // ---------------------------------------------------------------------
    // Hint
    // ---------------------------------------------------------------------

    /// Reveal one genuine pair for a short time. Returns whether a hint was shown.
    pub fn show_hint(&mut self) -> bool {
        if !self.hint.can_use()
            || self.hint.is_active()
            || self.shuffle.is_active()
            || self.processing_match
            || !self.selected.is_empty()
        {
            return false;
        }
        let Some((first, second)) = hint::find_pair(&self.tiles) else {
            debug!("no face-down pair left to hint");
            return false;
        };

        for index in [first, second] {
            if self.tiles[index].reveal() {
                self.events.push(BoardEvent::TileRevealed { index });
            }
        }
        self.hint.begin(
            (first, second),
            self.config.hint_display_seconds,
            self.config.hint_cooldown_seconds,
        );
        self.reset_combo();
        self.events.push(BoardEvent::HintShown { first, second });
        debug!(first, second, remaining = self.hint.remaining(), "hint shown");
        true
    }

    // ---------------------------------------------------------------------
    // Shuffle
    // ---------------------------------------------------------------------

    /// Reassign every unmatched tile to a new slot, animated over time.
    ///
    /// Refused while a shuffle is running or when fewer than two tiles can move.
    pub fn start_shuffle(&mut self, duration: f32) -> bool {
        if self.shuffle.is_active() {
            return false;
        }
        let movable: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| !self.tiles[i].is_matched())
            .collect();
        if movable.len() < 2 {
            return false;
        }
        let slots: Vec<usize> = movable.iter().map(|&i| self.slots[i]).collect();
        self.shuffle.start(&movable, &slots, duration, &mut self.rng);

        let mut revealed: ArrayVec<usize, 4> = ArrayVec::new();
        revealed.extend(self.selected.drain(..));
        if let Some((a, b)) = self.hint.pair() {
            for index in [a, b] {
                if !revealed.contains(&index) {
                    revealed.push(index);
                }
            }
        }
        for index in revealed {
            self.cancel_reveal(index);
        }
        self.processing_match = false;
        self.flip_back_timer = 0.0;
        self.hint.clear();
        self.reset_combo();

        self.events.push(BoardEvent::ShuffleStarted {
            tiles: movable.len(),
        });
        info!(tiles = movable.len(), duration, "shuffle started");
        true
    }

    fn cancel_reveal(&mut self, index: usize) {
        let tile = &mut self.tiles[index];
        match tile.face() {
            TileFace::FaceUp => {
                tile.hide();
            }
            TileFace::FlippingUp => {
                if !self.pending_hide.contains(&index) {
                    self.pending_hide.push(index);
                }
            }
            TileFace::FaceDown | TileFace::FlippingDown | TileFace::Matched => {}
        }
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    /// Fit the grid into new bounds. Tiles keep their slots; moving tiles are
    /// retargeted rather than snapped.
    pub fn relayout(&mut self, bounds: Rect) {
        self.layout = GridLayout::fit(self.layout.rows, self.layout.cols, bounds, self.layout.padding);
        self.slot_positions = self.layout.positions();
        for (tile, &slot) in self.tiles.iter_mut().zip(self.slots.iter()) {
            tile.set_size(self.layout.tile_size);
            tile.set_position(self.slot_positions[slot]);
        }
        debug!(
            width = bounds.width,
            height = bounds.height,
            "board relayout"
        );
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn all_matched(&self) -> bool {
        self.tiles.iter().all(Tile::is_matched)
    }

    pub fn matches_found(&self) -> u32 {
        self.matches_found
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_count.min(self.config.max_combo_multiplier)
    }

    pub fn combo_display_time(&self) -> f32 {
        self.combo_display
    }

    pub fn is_hint_active(&self) -> bool {
        self.hint.is_active()
    }

    pub fn hint_pair(&self) -> Option<(usize, usize)> {
        self.hint.pair()
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hint.remaining()
    }

    pub fn hint_cooldown(&self) -> f32 {
        self.hint.cooldown()
    }

    pub fn can_use_hint(&self) -> bool {
        self.hint.can_use()
    }

    pub fn is_shuffling(&self) -> bool {
        self.shuffle.is_active()
    }

    pub fn shuffle_duration(&self) -> f32 {
        self.shuffle.duration()
    }

    pub fn shuffle_progress(&self) -> f32 {
        self.shuffle.progress()
    }

    pub fn is_processing_match(&self) -> bool {
        self.processing_match
    }

    pub fn flip_back_timer(&self) -> f32 {
        self.flip_back_timer
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Slot index owned by each tile.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn card_back(&self) -> &Arc<CardBack> {
        &self.back
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> std::vec::Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    // ---------------------------------------------------------------------
    // Render surface
    // ---------------------------------------------------------------------

    pub fn tile_views(&self) -> impl Iterator<Item = TileView> + '_ {
        self.tiles.iter().enumerate().map(move |(index, tile)| TileView {
            index,
            key: tile.key(),
            bounds: tile.bounds(),
            face: tile.face(),
            scale_x: tile.scale_x(),
            shows_front: tile.shows_front(),
            selected: self.selected.contains(&index),
            hinted: self.hint.is_hinted(index),
            moving: tile.is_moving(),
        })
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.rows = self.layout.rows;
        out.cols = self.layout.cols;
        out.tiles.clear();
        out.tiles.extend(self.tile_views());
        out.matches_found = self.matches_found;
        out.pair_count = self.pair_count();
        out.combo_count = self.combo_count;
        out.combo_multiplier = self.combo_multiplier();
        out.combo_display_time = self.combo_display;
        out.hints_remaining = self.hint.remaining();
        out.hint_cooldown = self.hint.cooldown();
        out.hint_active = self.hint.is_active();
        out.shuffling = self.shuffle.is_active();
        out.shuffle_progress = self.shuffle.progress();
        out.processing_match = self.processing_match;
        out.locked = self.is_locked();
        out.all_matched = self.all_matched();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn check_grid(rows: usize, cols: usize) -> Result<(), BoardError> {
    if rows == 0 || cols == 0 {
        return Err(BoardError::EmptyGrid);
    }
    if (rows * cols) % 2 != 0 {
        return Err(BoardError::OddTileCount { rows, cols });
    }
    Ok(())
}

/// Rates must be positive and every delay, duration or interval non-negative,
/// otherwise an animation or countdown could never complete. NaN fails both.
fn check_config(config: &BoardConfig) -> Result<(), BoardError> {
    if !(config.flip_speed > 0.0) {
        return Err(BoardError::InvalidConfig {
            field: "flip_speed",
        });
    }
    let non_negative = [
        ("flip_back_delay", config.flip_back_delay),
        ("combo_display_seconds", config.combo_display_seconds),
        ("hint_cooldown_seconds", config.hint_cooldown_seconds),
        ("hint_display_seconds", config.hint_display_seconds),
        ("shuffle_start_interval", config.shuffle_start_interval),
        ("shuffle_move_duration", config.shuffle_move_duration),
    ];
    if let Some(&(field, _)) = non_negative.iter().find(|(_, v)| !(*v >= 0.0)) {
        return Err(BoardError::InvalidConfig { field });
    }
    if config.max_combo_multiplier == 0 {
        return Err(BoardError::InvalidConfig {
            field: "max_combo_multiplier",
        });
    }
    Ok(())
}

fn check_keys(expected: usize, keys: &[u32]) -> Result<(), BoardError> {
    if keys.len() != expected {
        return Err(BoardError::KeyCountMismatch {
            expected,
            actual: keys.len(),
        });
    }
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &key in keys {
        *counts.entry(key).or_default() += 1;
    }
    match counts.into_iter().find(|&(_, count)| count != 2) {
        Some((key, count)) => Err(BoardError::UnpairedKey { key, count }),
        None => Ok(()),
    }
}
