//! Injectable randomness for platform generation

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Integer in `[low, high)`. Callers guarantee `high > low`.
    fn range(&mut self, low: u32, high: u32) -> u32;
}

impl RandomSource for Pcg32 {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        self.random_range(low..high)
    }
}

/// Seeded production generator
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of values, wrapping when exhausted.
///
/// Each value is folded into the requested range with `low + v % (high - low)`,
/// so tests can predict every platform position.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far
    #[cfg(test)]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if self.values.is_empty() {
            return low;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        low + value % (high - low)
    }
}
