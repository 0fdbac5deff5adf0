//! Salt-parameterised string hash function.
//!
//! `H(salt, key) = (Σ byte(key[i]) * salt[i]) mod n`. Salt is extended
//! lazily, one entry per byte position, the first time a hash call sees a
//! key longer than the salt drawn so far. This is the only place the
//! build loop's randomness comes from.

use crate::rng::RngSource;
use crate::stats::BuildStats;

/// One of the two hash functions (`H1` or `H2`) threaded through a build.
#[derive(Debug, Clone, Default)]
pub struct HashFn {
    salt: Vec<u64>,
    salt_length: usize,
    n: usize,
}

impl HashFn {
    /// Reset for a new build iteration: salt is invalidated (frozen entries
    /// are forgotten) but the backing `Vec` is retained, and `n` is set to
    /// the current graph order.
    pub fn reset(&mut self, n: usize) {
        self.salt_length = 0;
        self.n = n;
    }

    pub fn salt_length(&self) -> usize {
        self.salt_length
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Draw salt entries for positions `[salt_length, len)` from `rng` if
    /// `len` is longer than anything hashed so far this iteration. This is
    /// the only place build-time randomness is consumed; it is the
    /// length-only half of `hash_extending`, split out so a build
    /// iteration can extend the salt once to the iteration's longest key
    /// and then hash every key read-only (and in parallel — see
    /// `build::run`).
    pub fn ensure_salt(&mut self, len: usize, rng: &mut dyn RngSource, stats: &mut BuildStats) {
        if self.salt.len() < len {
            let before_cap = self.salt.capacity();
            self.salt.resize(len, 0);
            let after_cap = self.salt.capacity();
            if after_cap > before_cap {
                stats.record_salt_realloc((after_cap - before_cap) as u64);
            }
        }
        if self.salt_length < len {
            let drawn = (len - self.salt_length) as u64;
            for slot in &mut self.salt[self.salt_length..len] {
                *slot = rng.next_u64() % self.n as u64;
            }
            self.salt_length = len;
            stats.record_prng_draw(drawn);
        }
    }

    /// Hash `key`, drawing fresh salt from `rng` first if needed. Only
    /// used by tests below; production build iterations pre-extend both
    /// salts to the iteration's longest key via [`HashFn::ensure_salt`]
    /// and then hash every key read-only via [`HashFn::hash_ready`].
    #[cfg(test)]
    fn hash_extending(&mut self, key: &[u8], rng: &mut dyn RngSource) -> usize {
        let mut stats = BuildStats::default();
        self.ensure_salt(key.len(), rng, &mut stats);
        self.hash_ready(key)
    }

    /// Hash `key` assuming the salt already covers `key.len()` (checked in
    /// debug builds). Never draws randomness. Used both for the
    /// already-extended, read-only half of a build iteration and — via
    /// [`HashFn::hash_frozen`] — for lookups after the table is built.
    pub(crate) fn hash_ready(&self, key: &[u8]) -> usize {
        debug_assert!(key.len() <= self.salt_length);
        self.sum(key)
    }

    /// Hash `key` against a frozen (post-build) salt. Never extends salt;
    /// the caller must have already checked
    /// `key.len() <= self.salt_length()`.
    pub fn hash_frozen(&self, key: &[u8]) -> usize {
        self.hash_ready(key)
    }

    #[inline]
    fn sum(&self, key: &[u8]) -> usize {
        let mut sum: i64 = 0;
        for (i, &b) in key.iter().enumerate() {
            let x = b as i64 * self.salt[i] as i64;
            sum += x;
        }
        debug_assert!(sum >= 0);
        (sum % self.n as i64) as usize
    }
}
