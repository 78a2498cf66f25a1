use memory_tiles_core::snapshot::{BoardSnapshot, TileView};
use memory_tiles_types::{TileFace, Vec2};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickError {
    BoardLocked,
    BoardCleared,
    NothingToClick,
    /// The first pick has not shown its front yet.
    Revealing,
}

impl PickError {
    pub fn code(self) -> &'static str {
        match self {
            PickError::BoardLocked | PickError::Revealing => "board_locked",
            PickError::BoardCleared | PickError::NothingToClick => "no_pick",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PickError::BoardLocked => "board is not accepting clicks",
            PickError::BoardCleared => "every pair is already matched",
            PickError::NothingToClick => "no face-down tile to click",
            PickError::Revealing => "waiting for the selected tile to turn over",
        }
    }
}

/// Memory-perfect player.
///
/// Remembers the key of every tile it has seen face up, keyed by tile index.
/// Indices survive shuffles, so the memory does too.
#[derive(Debug, Clone, Default)]
pub struct Autoplayer {
    seen: Vec<Option<u32>>,
}

impl Autoplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (new deal).
    pub fn reset(&mut self) {
        self.seen.clear();
    }

    pub fn known(&self, index: usize) -> Option<u32> {
        self.seen.get(index).copied().flatten()
    }

    pub fn known_count(&self) -> usize {
        self.seen.iter().filter(|k| k.is_some()).count()
    }

    /// Learn the keys of every tile currently showing its front.
    pub fn observe(&mut self, snapshot: &BoardSnapshot) {
        if self.seen.len() != snapshot.tiles.len() {
            self.seen.resize(snapshot.tiles.len(), None);
        }
        for view in &snapshot.tiles {
            if view.shows_front || view.face.is_revealed() {
                self.seen[view.index] = Some(view.key);
            }
        }
    }

    /// Next click, as a point inside the chosen tile.
    pub fn pick(&self, snapshot: &BoardSnapshot) -> Result<Vec2, PickError> {
        if snapshot.all_matched {
            return Err(PickError::BoardCleared);
        }
        if snapshot.locked {
            return Err(PickError::BoardLocked);
        }

        let face_down: Vec<&TileView> = snapshot.face_down().collect();
        if face_down.is_empty() {
            return Err(PickError::NothingToClick);
        }

        let choice = match snapshot.tiles.iter().find(|t| t.selected) {
            Some(first) => {
                let key = self.known(first.index).ok_or(PickError::Revealing)?;
                self.partner_of(first.index, key, &face_down)
                    .or_else(|| self.unseen(&face_down))
            }
            None => self.known_pair(&face_down).or_else(|| self.unseen(&face_down)),
        }
        .unwrap_or(face_down[0]);

        trace!(index = choice.index, "autoplayer pick");
        Ok(choice.bounds.center())
    }

    fn partner_of<'a>(
        &self,
        first: usize,
        key: u32,
        candidates: &[&'a TileView],
    ) -> Option<&'a TileView> {
        candidates
            .iter()
            .find(|t| t.index != first && self.known(t.index) == Some(key))
            .copied()
    }

    fn known_pair<'a>(&self, candidates: &[&'a TileView]) -> Option<&'a TileView> {
        candidates.iter().enumerate().find_map(|(i, a)| {
            let key = self.known(a.index)?;
            candidates[i + 1..]
                .iter()
                .any(|b| self.known(b.index) == Some(key))
                .then_some(*a)
        })
    }

    fn unseen<'a>(&self, candidates: &[&'a TileView]) -> Option<&'a TileView> {
        candidates
            .iter()
            .find(|t| self.known(t.index).is_none() && t.face == TileFace::FaceDown)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use memory_tiles_core::types::Rect;
    use memory_tiles_core::{Board, BoardConfig, ClickOutcome, GridLayout};

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn board(keys: &[u32], rows: usize, cols: usize) -> Board {
        let layout = GridLayout::fit(rows, cols, Rect::new(0.0, 0.0, 600.0, 600.0), 10.0);
        Board::with_keys(layout, keys.to_vec(), BoardConfig::default(), 3).unwrap()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PickError::BoardLocked.code(), "board_locked");
        assert_eq!(PickError::NothingToClick.code(), "no_pick");
        assert!(!PickError::BoardCleared.message().is_empty());
    }

    #[test]
    fn test_locked_board_refuses() {
        let mut b = board(&[0, 1, 0, 1], 2, 2);
        let p = b.tiles()[0].bounds().center();
        b.handle_click(p);
        let p = b.tiles()[1].bounds().center();
        b.handle_click(p);
        assert_eq!(Autoplayer::new().pick(&b.snapshot()), Err(PickError::BoardLocked));
    }

    #[test]
    fn test_waits_for_first_pick_to_turn() {
        let mut b = board(&[0, 1, 0, 1], 2, 2);
        let mut ai = Autoplayer::new();
        let p = b.tiles()[0].bounds().center();
        b.handle_click(p);
        ai.observe(&b.snapshot());
        assert_eq!(ai.pick(&b.snapshot()), Err(PickError::Revealing));
    }

    #[test]
    fn test_completes_known_pair() {
        let mut b = board(&[0, 1, 0, 1], 2, 2);
        let mut ai = Autoplayer::new();

        // Mismatch 0 and 1, then let them flip back.
        for i in [0, 1] {
            let p = b.tiles()[i].bounds().center();
            b.handle_click(p);
        }
        for _ in 0..90 {
            b.update(DT);
            ai.observe(&b.snapshot());
        }
        assert_eq!(ai.known_count(), 2);
        assert!(!b.snapshot().locked);

        // No known pair yet: explore the first unseen tile.
        let p = ai.pick(&b.snapshot()).unwrap();
        assert_eq!(b.tile_at(p), Some(2));
        b.handle_click(p);
        for _ in 0..10 {
            b.update(DT);
            ai.observe(&b.snapshot());
        }

        // Tile 2 turned out to be key 0, whose partner is remembered.
        let p = ai.pick(&b.snapshot()).unwrap();
        assert_eq!(b.tile_at(p), Some(0));
        assert!(matches!(b.handle_click(p), ClickOutcome::Matched { key: 0, .. }));
    }

    #[test]
    fn test_plays_a_full_board() {
        let keys: Vec<u32> = vec![3, 1, 0, 2, 1, 3, 2, 0];
        let mut b = board(&keys, 2, 4);
        let mut ai = Autoplayer::new();

        for _ in 0..3000 {
            if b.all_matched() {
                break;
            }
            b.update(DT);
            let snap = b.snapshot();
            ai.observe(&snap);
            if let Ok(p) = ai.pick(&snap) {
                assert!(!matches!(b.handle_click(p), ClickOutcome::Ignored(_)));
            }
        }
        assert!(b.all_matched());
        assert_eq!(b.matches_found(), 4);
    }
}
