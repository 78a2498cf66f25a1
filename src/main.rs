//! Headless memory-tiles runner (default binary).
//!
//! Plays one game with the autoplayer at a fixed 60 Hz timestep and logs the
//! result. Useful as a soak test and for checking config files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

use memory_tiles::core::{BoardSnapshot, CueCounter, FileHighScoreStore, Game, GameConfig};
use memory_tiles::engine::Autoplayer;
use memory_tiles::types::{Difficulty, DEFAULT_SHUFFLE_SECONDS, FRAME_SECONDS};

#[derive(Parser, Debug)]
#[command(name = "memory-tiles", about = "Play a memory tiles game headlessly")]
struct Args {
    /// Board size: easy, medium or hard
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Deal seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u32>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// High score file
    #[arg(long = "high-score")]
    high_score: Option<PathBuf>,

    /// Give up after this much game time
    #[arg(long, default_value_t = 600.0)]
    max_seconds: f32,

    /// Use a hint whenever one is available
    #[arg(long, default_value_t = false)]
    use_hints: bool,

    /// Shuffle once after this many matches
    #[arg(long)]
    shuffle_after: Option<u32>,

    /// Delay between autoplayer clicks, in milliseconds
    #[arg(long, default_value_t = 250)]
    think_ms: u32,
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(raw).ok_or_else(|| format!("unknown difficulty '{raw}'"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    run(&args, config)
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(path) = &args.high_score {
        config.high_score_path = path.clone();
    }
    Ok(config)
}

fn run(args: &Args, config: GameConfig) -> Result<()> {
    let store = FileHighScoreStore::new(config.high_score_path.clone());
    let mut game = Game::new(config, Box::new(store), Box::new(CueCounter::default()))
        .context("building the board")?;
    let mut ai = Autoplayer::new();
    let mut snapshot = BoardSnapshot::default();

    let think = args.think_ms as f32 / 1000.0;
    let mut wait = think;
    let mut shuffled = false;

    while !game.is_won() && game.elapsed() < args.max_seconds {
        game.update(FRAME_SECONDS);
        game.snapshot_into(&mut snapshot);
        ai.observe(&snapshot);

        wait -= FRAME_SECONDS;
        if wait > 0.0 {
            continue;
        }

        if let Some(after) = args.shuffle_after {
            if !shuffled && game.board().matches_found() >= after && game.start_shuffle(DEFAULT_SHUFFLE_SECONDS) {
                shuffled = true;
                wait = think;
                continue;
            }
        }

        if args.use_hints && game.board().selected().is_empty() && game.show_hint() {
            wait = think;
            continue;
        }

        match ai.pick(&snapshot) {
            Ok(point) => {
                game.handle_click(point);
                wait = think;
            }
            Err(e) => trace!(code = e.code(), reason = e.message(), "no pick this frame"),
        }
    }

    let score = game.score();
    if game.is_won() {
        info!(
            score = score.score(),
            moves = score.moves(),
            matches = score.matches(),
            elapsed = game.elapsed(),
            high_score = score.high_score(),
            "game finished"
        );
    } else {
        warn!(
            matches = score.matches(),
            pairs = game.board().pair_count(),
            elapsed = game.elapsed(),
            "gave up before clearing the board"
        );
    }
    Ok(())
}
