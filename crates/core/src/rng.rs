//! RNG module - deterministic shuffling for deals and board shuffles
//!
//! A small LCG keeps games reproducible from a seed (same seed, same deal, same
//! shuffle permutation), which the tests and the autoplayer rely on.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Deal `pairs` pair keys (`0..pairs`, each exactly twice) in shuffled order.
pub fn deal_keys(pairs: usize, rng: &mut SimpleRng) -> Vec<u32> {
    let mut keys = Vec::with_capacity(pairs * 2);
    for key in 0..pairs as u32 {
        keys.push(key);
        keys.push(key);
    }
    rng.shuffle(&mut keys);
    keys
}
