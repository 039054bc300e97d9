//! Seeded random number source for deterministic generation
//!
//! Every stage of the pipeline draws from a single [`TownRng`] created once
//! per generation attempt, so the same seed always reproduces the same town.
//! The generator is ChaCha8 keyed by a `u64` seed; no hidden entropy is
//! consulted once seeded.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream with the helpers the generator needs
#[derive(Debug, Clone)]
pub struct TownRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl TownRng {
    /// Create a new stream from an integer seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a fresh seed from the current one
    ///
    /// Used by the retry loop: each failed attempt restarts from a new,
    /// deterministically derived seed, so recovery itself is reproducible.
    pub fn derive_seed(seed: u64) -> u64 {
        // splitmix64 step
        let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Reset the stream to a new seed
    pub fn reset(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
    }

    /// Uniform float in `[0, 1)`
    #[inline]
    pub fn next_float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform integer in `[min, max)`; returns `min` for empty ranges
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        min + (self.next_float() * (max - min) as f64) as i64
    }

    /// Uniform index in `[0, len)`; `len` must be nonzero
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let i = (self.next_float() * len as f64) as usize;
        i.min(len - 1)
    }

    /// True with probability `chance`
    #[inline]
    pub fn next_bool(&mut self, chance: f64) -> bool {
        self.next_float() < chance
    }

    /// Bell-ish value in `[0, 1)`: average of three uniform floats
    pub fn normal(&mut self) -> f64 {
        (self.next_float() + self.next_float() + self.next_float()) / 3.0
    }

    /// Value biased toward 0.5, blended by chaos factor `f` in `[0, 1]`
    ///
    /// `fuzzy(0.0)` is exactly 0.5; `fuzzy(1.0)` is `normal()`.
    pub fn fuzzy(&mut self, f: f64) -> f64 {
        if f == 0.0 {
            0.5
        } else {
            (1.0 - f) / 2.0 + f * self.normal()
        }
    }
}
