//! Random source used by the mock generators
//!
//! Production code draws from entropy; tests build a source from a fixed seed
//! so generated metadata is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Everything the mock generators need from randomness
pub trait RandomSource {
    /// Uniform index in `0..len`; `len` must be non-zero
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform integer in `low..high`
    fn range(&mut self, low: u32, high: u32) -> u32;

    /// Lowercase base-36 token of `len` characters
    fn token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| BASE36[self.pick_index(BASE36.len())] as char)
            .collect()
    }
}

/// `StdRng`-backed source
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn range(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..high)
    }
}
