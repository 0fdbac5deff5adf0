//! The PRNG abstraction backing salt extension.
//!
//! CHM construction needs exactly one thing from its random source: a
//! stream of non-negative integers, reducible modulo the current graph
//! order. The build loop is threaded through a `&mut dyn RngSource` rather
//! than a concrete RNG type so tests can swap in a deterministic generator
//! while production code defaults to a process-wide ambient PRNG.

use rand::{RngCore, SeedableRng};
use rand::rngs::StdRng;
use std::sync::{Mutex, OnceLock};

/// A source of non-negative integers for salt extension.
///
/// Implementations need not be cryptographically secure; CHM's randomized
/// search only needs enough spread to make the acyclicity test succeed
/// within a small number of retries.
pub trait RngSource {
    fn next_u64(&mut self) -> u64;
}

/// The host PRNG, seedable for reproducible runs.
pub struct StdRngSource(StdRng);

impl StdRngSource {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RngSource for StdRngSource {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

static GLOBAL_RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();

fn global() -> &'static Mutex<StdRng> {
    GLOBAL_RNG.get_or_init(|| Mutex::new(StdRng::from_entropy()))
}

/// Reseed the process-wide ambient PRNG. Affects every subsequent
/// [`ProcessRng`] draw in this process, but does not retroactively change a
/// table already built.
pub fn seed_global(seed: u64) {
    *global().lock().unwrap() = StdRng::seed_from_u64(seed);
}

/// The default RNG used by [`crate::build::build`] when the caller doesn't
/// supply their own: draws from the process-wide ambient state, consuming
/// it rather than reseeding it.
pub struct ProcessRng;

impl RngSource for ProcessRng {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        global().lock().unwrap().next_u64()
    }
}

/// A small deterministic counter-based source for tests: not statistically
/// sound randomness, just a reproducible, fast-moving stream so build
/// traces are pinned across runs.
#[cfg(test)]
pub(crate) struct CountingRng(pub u64);

#[cfg(test)]
impl RngSource for CountingRng {
    fn next_u64(&mut self) -> u64 {
        // splitmix64, cheap and well-distributed enough for test fixtures
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}
