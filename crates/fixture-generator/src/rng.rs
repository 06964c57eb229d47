//! Seeded pseudo-random source.
//!
//! A fixed seed string and a fixed call order yield an identical output
//! sequence regardless of machine or process. The source never reads the
//! wall clock or ambient entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic value stream keyed by a string seed.
///
/// Ids come from the seed hash combined with an internal monotonic counter,
/// so they are collision-free within a run without consuming RNG state.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
    seed: String,
    seed_hash: u64,
    counter: u64,
}

impl SeededRng {
    /// Create a source keyed by `seed`.
    pub fn new(seed: &str) -> Self {
        let seed_hash = fnv1a(seed.as_bytes());
        Self {
            rng: StdRng::seed_from_u64(seed_hash),
            seed: seed.to_string(),
            seed_hash,
            counter: 0,
        }
    }

    /// The seed string this source was keyed by.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Next float in `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Random integer in `[min, max]` (inclusive). `min` and `max` are
    /// swapped if given out of order.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(lo..=hi)
    }

    /// Random element of `items`.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty, like slice indexing.
    pub fn random_choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "random_choice on empty slice");
        let idx = self.rng.random_range(0..items.len());
        &items[idx]
    }

    /// Random boolean, true with `probability` (clamped to `[0, 1]`).
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    /// Next run-unique identifier: seed hash plus a monotonic counter.
    pub fn next_id(&mut self) -> String {
        let id = format!("{:016x}-{:08x}", self.seed_hash, self.counter);
        self.counter += 1;
        id
    }
}

/// Stable 64-bit FNV-1a fold of the seed bytes.
///
/// `std`'s default hasher is unspecified across releases, so it cannot back
/// the cross-machine determinism contract.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
