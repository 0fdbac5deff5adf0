//! Lookup and the finalized table, spec.md §4.5 and §3/§6.

use crate::hashfn::HashFn;
use crate::input::InputSet;
use crate::stats::BuildStats;

/// The record returned by a successful [`Table::lookup`]: a view valid
/// for as long as the table is borrowed.
#[derive(Debug)]
pub struct LookupResult<'t, P> {
    pub key: &'t [u8],
    pub payload: &'t P,
}

/// A built minimal perfect hash table: owns its keys, its two frozen hash
/// functions, and the value array the CHM construction produced.
#[derive(Debug)]
pub struct Table<'a, P> {
    keys: InputSet<'a, P>,
    f1: HashFn,
    f2: HashFn,
    value: Vec<usize>,
    stats: BuildStats,
}

impl<'a, P> Table<'a, P> {
    pub(crate) fn new(
        keys: InputSet<'a, P>,
        f1: HashFn,
        f2: HashFn,
        value: Vec<usize>,
        stats: BuildStats,
    ) -> Self {
        Self { keys, f1, f2, value, stats }
    }

    /// Number of keys in the table (`K`).
    pub fn size(&self) -> usize {
        self.keys.size()
    }

    /// Graph order the build settled on (`n`); always `> size()`.
    pub fn order(&self) -> usize {
        self.value.len()
    }

    /// The raw vertex value table, mostly useful for tests and
    /// determinism checks.
    pub fn values(&self) -> &[usize] {
        &self.value
    }

    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Look up `key`. Spec.md §4.5:
    /// 1. a query longer than either frozen salt is an automatic miss
    ///    without hashing;
    /// 2. `H1`/`H2` are applied without ever extending salt;
    /// 3. the implied slot is rejected unless the stored key there is a
    ///    byte-for-byte (length-aware, zero-byte-safe) match.
    pub fn lookup(&self, key: &[u8]) -> Option<LookupResult<'_, P>> {
        let min_salt = self.f1.salt_length().min(self.f2.salt_length());
        if key.len() > min_salt {
            return None;
        }

        let r1 = self.f1.hash_frozen(key);
        let r2 = self.f2.hash_frozen(key);
        let n = self.value.len();
        let i = (self.value[r1] + self.value[r2]) % n;

        if i >= self.keys.size() {
            return None;
        }

        let record = &self.keys.records[i];
        let stored = record.key();
        if stored.len() != key.len() || stored != key {
            return None;
        }

        Some(LookupResult { key: stored, payload: &record.payload })
    }

    /// A contiguous view of every `(key, payload)` pair, in insertion
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &P)> {
        self.keys.records.iter().map(|r| (r.key(), &r.payload))
    }

    /// Apply `f` to every `(key, payload)` pair in insertion order.
    pub fn for_each<F: FnMut(&[u8], &P)>(&self, f: F) {
        self.keys.for_each(f);
    }

    /// Apply `f` to every `(key, payload)` pair in insertion order, with
    /// mutable access to the payload.
    pub fn for_each_mut<F: FnMut(&[u8], &mut P)>(&mut self, f: F) {
        self.keys.for_each_mut(f);
    }

    /// Destroy this table, handing its owned key records back as a fresh
    /// [`InputSet`] without copying any key bytes (spec.md §3 "recycle").
    pub fn recycle(self) -> InputSet<'a, P> {
        self.keys
    }

    /// Copy this table's key records into a fresh [`InputSet`]; the table
    /// remains usable afterward. Unlike [`Table::recycle`], this does copy
    /// key bytes for any owned record (`Record::clone` deep-copies
    /// `KeyBytes::Owned`); only records added via `add_borrowed` avoid a
    /// byte copy, since their `KeyBytes::Borrowed` variant is just a
    /// reference.
    pub fn copy_to_input_set(&self) -> InputSet<'a, P>
    where
        P: Clone,
    {
        InputSet { records: self.keys.records.clone() }
    }
}

#[cfg(test)]
mod tests {
    use crate::build::{build_with_rng, BuildConfig};
    use crate::input::InputSet;
    use crate::rng::CountingRng;

    #[test]
    fn embedded_zero_bytes_round_trip() {
        let mut input: InputSet<'_, ()> = InputSet::new();
        input.add(b"\x00", ());
        input.add(b"\x00\x00", ());
        input.add(b"\x00\x00\x00", ());
        let mut rng = CountingRng(3);
        let table = build_with_rng(input, &BuildConfig::default(), &mut rng).unwrap();

        assert!(table.lookup(b"\x00").is_some());
        assert!(table.lookup(b"\x00\x00").is_some());
        assert!(table.lookup(b"\x00\x00\x00").is_some());
        assert!(table.lookup(b"\x00\x00\x00\x00").is_none());
    }

    #[test]
    fn trailing_zero_byte_distinguishes_keys() {
        let mut input: InputSet<'_, &'static str> = InputSet::new();
        input.add(b"ab", "no-nul");
        input.add(b"ab\0", "with-nul");
        let mut rng = CountingRng(11);
        let table = build_with_rng(input, &BuildConfig::default(), &mut rng).unwrap();

        assert_eq!(*table.lookup(b"ab").unwrap().payload, "no-nul");
        assert_eq!(*table.lookup(b"ab\0").unwrap().payload, "with-nul");
    }

    #[test]
    fn query_longer_than_any_inserted_key_is_a_miss_without_extending_salt() {
        let mut input: InputSet<'_, ()> = InputSet::new();
        input.add(b"x", ());
        let mut rng = CountingRng(5);
        let table = build_with_rng(input, &BuildConfig::default(), &mut rng).unwrap();
        assert!(table.lookup(b"xy").is_none());
        assert!(table.lookup(b"y").is_none());
    }

    #[test]
    fn recycle_round_trips_every_original_key_in_order() {
        let mut input: InputSet<'_, usize> = InputSet::new();
        let keys: [&[u8]; 4] = [b"one", b"two", b"three", b"four"];
        for (i, k) in keys.iter().enumerate() {
            input.add(k, i);
        }
        let mut rng = CountingRng(21);
        let table = build_with_rng(input, &BuildConfig::default(), &mut rng).unwrap();
        let recycled = table.recycle();

        let mut seen = Vec::new();
        recycled.for_each(|k, p| seen.push((k.to_vec(), *p)));
        let expected: Vec<_> = keys.iter().enumerate().map(|(i, k)| (k.to_vec(), i)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn copy_to_input_set_leaves_table_usable() {
        let mut input: InputSet<'_, usize> = InputSet::new();
        input.add(b"alpha", 0);
        input.add(b"beta", 1);
        let mut rng = CountingRng(31);
        let table = build_with_rng(input, &BuildConfig::default(), &mut rng).unwrap();

        let copy = table.copy_to_input_set();
        assert_eq!(copy.size(), 2);
        assert!(table.lookup(b"alpha").is_some());
    }
}
