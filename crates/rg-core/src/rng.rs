//! Deterministic RNG for randomized search strategies.
//!
//! # Determinism strategy
//!
//! Each query gets its own `SmallRng` seeded from the configured seed, so a
//! randomized ensemble is reproducible for a given graph and config.  Worker
//! threads that run several queries derive children with [`SearchRng::child`]
//! rather than sharing one generator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-query deterministic RNG.
pub struct SearchRng(SmallRng);

impl SearchRng {
    pub fn new(seed: u64) -> Self {
        SearchRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child stream.  Children drawn in the same order from the
    /// same root get the same seeds, whichever thread later consumes them.
    pub fn child(&mut self, offset: u64) -> SearchRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SearchRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform sample in the closed range `[lo, hi]`.  Returns `lo` when the
    /// range is empty or degenerate.
    #[inline]
    pub fn factor(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo { self.0.gen_range(lo..=hi) } else { lo }
    }
}
