//! Shuffle scheduler.
//!
//! A shuffle reassigns the slots of every unmatched tile. The tile order and the
//! slot pool are permuted independently, then paired up by position: `order[i]`
//! moves to `slots[i]`. Moves start staggered (`i * start_interval`) so the board
//! ripples instead of jumping all at once.

use crate::rng::SimpleRng;

#[derive(Debug, Clone, Default)]
pub struct ShuffleScheduler {
    active: bool,
    duration: f32,
    elapsed: f32,
    order: Vec<usize>,
    target_slots: Vec<usize>,
    next: usize,
    start_interval: f32,
    move_duration: f32,
}

impl ShuffleScheduler {
    pub fn new(start_interval: f32, move_duration: f32) -> Self {
        Self {
            start_interval,
            move_duration,
            ..Self::default()
        }
    }

    /// Plan a shuffle of `tiles`, currently sitting in `slots` (parallel slices).
    pub fn start(&mut self, tiles: &[usize], slots: &[usize], duration: f32, rng: &mut SimpleRng) {
        debug_assert_eq!(tiles.len(), slots.len());

        self.order.clear();
        self.order.extend_from_slice(tiles);
        self.target_slots.clear();
        self.target_slots.extend_from_slice(slots);

        rng.shuffle(&mut self.order);
        rng.shuffle(&mut self.target_slots);

        self.active = true;
        self.duration = duration;
        self.elapsed = 0.0;
        self.next = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn move_duration(&self) -> f32 {
        self.move_duration
    }

    /// Fraction of the requested duration that has elapsed, `0..=1`.
    pub fn progress(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Planned `(tile, slot)` assignments.
    pub fn assignments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.order.iter().copied().zip(self.target_slots.iter().copied())
    }

    pub fn all_started(&self) -> bool {
        self.next >= self.order.len()
    }

    /// Advance the clock and call `start_move(tile, slot)` for every move whose
    /// start time has passed.
    pub fn advance(&mut self, dt: f32, mut start_move: impl FnMut(usize, usize)) {
        if !self.active {
            return;
        }
        self.elapsed += dt;

        while self.next < self.order.len() && self.elapsed >= self.next as f32 * self.start_interval {
            start_move(self.order[self.next], self.target_slots[self.next]);
            self.next += 1;
        }
    }

    /// End the shuffle and release the plan buffers.
    pub fn finish(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
        self.next = 0;
        self.order = Vec::new();
        self.target_slots = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_is_permutation_of_inputs() {
        let mut s = ShuffleScheduler::new(0.02, 0.45);
        let tiles = [0, 2, 3, 5, 7, 8];
        let slots = [10, 12, 13, 15, 17, 18];
        s.start(&tiles, &slots, 1.0, &mut SimpleRng::new(5));

        let mut planned_tiles: Vec<usize> = s.assignments().map(|(t, _)| t).collect();
        let mut planned_slots: Vec<usize> = s.assignments().map(|(_, sl)| sl).collect();
        planned_tiles.sort_unstable();
        planned_slots.sort_unstable();
        assert_eq!(planned_tiles, tiles);
        assert_eq!(planned_slots, slots);
    }

    #[test]
    fn test_staggered_starts() {
        let mut s = ShuffleScheduler::new(0.1, 0.45);
        s.start(&[0, 1, 2, 3], &[0, 1, 2, 3], 1.0, &mut SimpleRng::new(1));

        let mut started = 0;
        s.advance(0.0, |_, _| started += 1);
        assert_eq!(started, 1, "first move starts immediately");
        s.advance(0.15, |_, _| started += 1);
        assert_eq!(started, 2);
        s.advance(0.2, |_, _| started += 1);
        assert_eq!(started, 4);
        assert!(s.all_started());
    }

    #[test]
    fn test_progress_and_finish() {
        let mut s = ShuffleScheduler::new(0.02, 0.45);
        assert_eq!(s.progress(), 0.0);
        s.start(&[0, 1], &[0, 1], 2.0, &mut SimpleRng::new(1));
        s.advance(1.0, |_, _| {});
        assert!((s.progress() - 0.5).abs() < 1e-6);
        s.finish();
        assert!(!s.is_active());
        assert_eq!(s.assignments().count(), 0);
    }
}
