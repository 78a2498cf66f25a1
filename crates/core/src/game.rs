//! Game wiring - one board, one score tracker, one cue sink
//!
//! `Game` is the only place where board events meet scoring and audio. After
//! every call that can mutate the board, the queued events are drained and
//! forwarded to the [`ScoreTracker`] and the [`SoundCues`] sink.

use tracing::info;

use crate::board::{Board, ClickOutcome, IgnoreReason};
use crate::config::GameConfig;
use crate::cues::{NoCues, SoundCues};
use crate::error::BoardError;
use crate::layout::{grid_dimensions, GridLayout};
use crate::rng::SimpleRng;
use crate::score::ScoreTracker;
use crate::snapshot::BoardSnapshot;
use crate::storage::{FileHighScoreStore, HighScoreStore};
use crate::types::{Difficulty, Rect, Vec2};

pub struct Game {
    config: GameConfig,
    difficulty: Difficulty,
    board: Board,
    score: ScoreTracker,
    cues: Box<dyn SoundCues>,
    rng: SimpleRng,
    deal_seed: u32,
    episode_id: u32,
    elapsed: f32,
    paused: bool,
    won: bool,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("difficulty", &self.difficulty)
            .field("episode_id", &self.episode_id)
            .field("deal_seed", &self.deal_seed)
            .field("elapsed", &self.elapsed)
            .field("paused", &self.paused)
            .field("won", &self.won)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(
        config: GameConfig,
        store: Box<dyn HighScoreStore>,
        cues: Box<dyn SoundCues>,
    ) -> Result<Self, BoardError> {
        let mut rng = SimpleRng::new(config.seed);
        let deal_seed = rng.next_u32();
        let difficulty = config.difficulty;
        let board = build_board(&config, difficulty, deal_seed)?;
        let score = ScoreTracker::new(store, config.scoring);

        info!(
            difficulty = difficulty.as_str(),
            seed = config.seed,
            high_score = score.high_score(),
            "game created"
        );

        Ok(Self {
            config,
            difficulty,
            board,
            score,
            cues,
            rng,
            deal_seed,
            episode_id: 0,
            elapsed: 0.0,
            paused: false,
            won: false,
        })
    }

    /// Game persisting its high score to `config.high_score_path`, without audio.
    pub fn with_file_store(config: GameConfig) -> Result<Self, BoardError> {
        let store = FileHighScoreStore::new(config.high_score_path.clone());
        Self::new(config, Box::new(store), Box::new(NoCues))
    }

    /// Deal a fresh board and zero the running score.
    pub fn new_game(&mut self, difficulty: Difficulty) -> Result<(), BoardError> {
        let deal_seed = self.rng.next_u32();
        self.board = build_board(&self.config, difficulty, deal_seed)?;
        self.difficulty = difficulty;
        self.deal_seed = deal_seed;
        self.score.reset_score();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.elapsed = 0.0;
        self.paused = false;
        self.won = false;
        info!(
            difficulty = difficulty.as_str(),
            episode = self.episode_id,
            "new game"
        );
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), BoardError> {
        self.new_game(self.difficulty)
    }

    pub fn update(&mut self, dt: f32) {
        if self.paused || self.won {
            return;
        }
        self.elapsed += dt;
        self.board.update(dt);
        self.flush_events();

        if self.board.all_matched() {
            self.won = true;
            let new_best = self.score.try_save_high_score();
            info!(
                score = self.score.score(),
                moves = self.score.moves(),
                elapsed = self.elapsed,
                new_best,
                "board cleared"
            );
        }
    }

    pub fn handle_click(&mut self, point: Vec2) -> ClickOutcome {
        if self.won {
            return ClickOutcome::Ignored(IgnoreReason::Finished);
        }
        if self.paused {
            return ClickOutcome::Ignored(IgnoreReason::Paused);
        }
        let outcome = self.board.handle_click(point);
        if !outcome.is_ignored() {
            self.score.add_move();
        }
        self.flush_events();
        outcome
    }

    pub fn show_hint(&mut self) -> bool {
        if self.paused || self.won {
            return false;
        }
        let shown = self.board.show_hint();
        self.flush_events();
        shown
    }

    pub fn start_shuffle(&mut self, duration: f32) -> bool {
        if self.paused || self.won {
            return false;
        }
        let started = self.board.start_shuffle(duration);
        self.flush_events();
        started
    }

    pub fn toggle_pause(&mut self) {
        if !self.won {
            self.paused = !self.paused;
        }
    }

    /// Fit the board into a new screen size, keeping the HUD strip.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.layout.screen_width = width;
        self.config.layout.screen_height = height;
        self.board.relayout(self.config.layout.board_bounds());
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.cues.set_muted(muted);
    }

    pub fn is_muted(&self) -> bool {
        self.cues.is_muted()
    }

    fn flush_events(&mut self) {
        for event in self.board.take_events() {
            self.score.record(&event);
            self.cues.on_event(&event);
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deal_seed(&self) -> u32 {
        self.deal_seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        self.board.snapshot_into(out);
        if self.paused {
            out.locked = true;
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn build_board(config: &GameConfig, difficulty: Difficulty, seed: u32) -> Result<Board, BoardError> {
    let (cols, rows) = grid_dimensions(difficulty.tile_count());
    let bounds: Rect = config.layout.board_bounds();
    let layout = GridLayout::fit(rows, cols, bounds, config.layout.padding);
    Board::new(layout, config.board, seed)
}
