//! Sound cue seam.
//!
//! The engine never talks to an audio device. The game wiring forwards board
//! events to a `SoundCues` implementation; `NoCues` is the null object used when
//! there is no audio at all.

use crate::types::BoardEvent;

pub trait SoundCues {
    fn play_flip(&mut self);

    fn play_match(&mut self);

    fn set_muted(&mut self, _muted: bool) {}

    fn is_muted(&self) -> bool {
        false
    }

    /// Map a board event to a cue. Muting is left to the implementation.
    fn on_event(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::TileRevealed { .. } => self.play_flip(),
            BoardEvent::PairMatched { .. } => self.play_match(),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoCues;

impl SoundCues for NoCues {
    fn play_flip(&mut self) {}

    fn play_match(&mut self) {}
}

/// Counts cues instead of playing them; handy in tests and the headless runner.
#[derive(Debug, Clone, Default)]
pub struct CueCounter {
    pub flips: u32,
    pub matches: u32,
    muted: bool,
}

impl SoundCues for CueCounter {
    fn play_flip(&mut self) {
        if !self.muted {
            self.flips += 1;
        }
    }

    fn play_match(&mut self) {
        if !self.muted {
            self.matches += 1;
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
