//! Score tracker - moves, matches, running score and the persisted high score
//!
//! The score is signed: mismatches and hints subtract points with no floor.
//! Storage problems are logged and swallowed; the tracker always has a usable
//! high score (0 when nothing could be read).

use tracing::{error, info, warn};

use crate::config::ScoringRules;
use crate::storage::HighScoreStore;
use crate::types::BoardEvent;

pub struct ScoreTracker {
    moves: u32,
    matches: u32,
    score: i32,
    high_score: i32,
    rules: ScoringRules,
    store: Box<dyn HighScoreStore>,
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("moves", &self.moves)
            .field("matches", &self.matches)
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .field("store", &self.store.describe())
            .finish()
    }
}

impl ScoreTracker {
    /// Create a tracker and load the high score once from `store`.
    pub fn new(store: Box<dyn HighScoreStore>, rules: ScoringRules) -> Self {
        let high_score = match store.load() {
            Ok(Some(v)) => v,
            Ok(None) => {
                warn!(store = %store.describe(), "no high score stored yet, starting at 0");
                0
            }
            Err(e) => {
                warn!(error = %e, "failed to read high score, starting at 0");
                0
            }
        };

        Self {
            moves: 0,
            matches: 0,
            score: 0,
            high_score,
            rules,
            store,
        }
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    pub fn add_move(&mut self) {
        self.moves += 1;
    }

    pub fn add_match(&mut self, multiplier: u32) {
        self.matches += 1;
        self.score += self.rules.match_points * multiplier as i32;
    }

    pub fn add_mismatch(&mut self) {
        self.score -= self.rules.mismatch_penalty;
    }

    pub fn add_hint_penalty(&mut self) {
        self.score -= self.rules.hint_penalty;
    }

    /// Zero moves, matches and score. The high score is kept.
    pub fn reset_score(&mut self) {
        self.moves = 0;
        self.matches = 0;
        self.score = 0;
    }

    /// Apply the scoring side of a board event.
    pub fn record(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::PairMatched { multiplier, .. } => self.add_match(multiplier),
            BoardEvent::PairMismatched => self.add_mismatch(),
            BoardEvent::HintShown { .. } => self.add_hint_penalty(),
            BoardEvent::TileRevealed { .. }
            | BoardEvent::ShuffleStarted { .. }
            | BoardEvent::ShuffleFinished => {}
        }
    }

    /// Persist the current score if it beats the high score.
    ///
    /// Returns whether a new high score was reached. A failed write is logged;
    /// the in-memory high score is updated either way.
    pub fn try_save_high_score(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }

        self.high_score = self.score;
        match self.store.save(self.high_score) {
            Ok(()) => info!(score = self.high_score, "new high score saved"),
            Err(e) => error!(error = %e, "failed to save high score"),
        }
        true
    }
}
