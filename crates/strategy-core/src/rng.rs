//! Random Sources
//!
//! The selector and personality jitter draw through [`RandomSource`] so tests
//! can inject a seeded generator or an explicit draw sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source.
pub trait RandomSource {
    /// Returns an integer in `[0, bound)`, or 0 when `bound` is 0.
    fn next_int(&mut self, bound: u32) -> u32;
}

/// Seeded random number generator
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Each draw is reduced modulo the requested bound. An empty sequence always
/// yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: Vec<u32>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(draws: impl Into<Vec<u32>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedDraws {
    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 || self.draws.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw % bound
    }
}
