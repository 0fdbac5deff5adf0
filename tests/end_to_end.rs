//! End-to-end scenarios from spec.md §8 (E1-E6) plus the invariants that
//! bind across the whole crate (bijection, non-membership rejection,
//! recycle round-trip, determinism).

use chm_hash::{build_with_rng, BuildConfig, InputSet, StdRngSource};
use std::collections::HashSet;

fn rng(seed: u64) -> StdRngSource {
    StdRngSource::from_seed(seed)
}

/// E1: a handful of short string keys.
#[test]
fn e1_small_string_set() {
    let mut input: InputSet<'_, &'static str> = InputSet::new();
    let entries: [(&[u8], &str); 5] = [
        (b"foo", "foo"),
        (b"bar", "bar"),
        (b"donkey", "donkey"),
        (b"mineral", "mineral"),
        (b"toaster oven", "toaster oven"),
    ];
    for (k, v) in entries {
        input.add(k, v);
    }

    let table = build_with_rng(input, &BuildConfig::default(), &mut rng(1)).unwrap();

    assert_eq!(*table.lookup(b"mineral").unwrap().payload, "mineral");
    assert!(table.lookup(b"gronk").is_none());
    assert!(table.lookup(b"foo\0").is_none());
}

/// E2: 100,000 distinct 64-byte keys; sampled lookups of members and
/// non-members. Marked `ignore` since it's a multi-second build, not a
/// quick unit check.
#[test]
#[ignore = "large"]
fn e2_large_random_key_set() {
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    let mut gen = StdRng::seed_from_u64(7);
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(100_000);
    while keys.len() < 100_000 {
        let mut buf = [0u8; 64];
        gen.fill_bytes(&mut buf);
        if seen.insert(buf) {
            keys.push(buf);
        }
    }

    let mut input: InputSet<'_, usize> = InputSet::new();
    for (i, k) in keys.iter().enumerate() {
        input.add(k, i);
    }

    let table = build_with_rng(input, &BuildConfig::default(), &mut rng(7)).unwrap();

    for i in (0..keys.len()).step_by(100).take(1000) {
        let r = table.lookup(&keys[i]).expect("inserted key must be found");
        assert_eq!(*r.payload, i);
    }

    let mut misses = 0;
    let mut tried = 0;
    while tried < 1000 {
        let mut buf = [0u8; 64];
        gen.fill_bytes(&mut buf);
        if seen.contains(&buf) {
            continue;
        }
        tried += 1;
        if table.lookup(&buf).is_none() {
            misses += 1;
        }
    }
    assert_eq!(misses, 1000);
}

/// E3: keys that are runs of zero bytes of increasing length.
#[test]
fn e3_all_zero_keys() {
    let mut input: InputSet<'_, usize> = InputSet::new();
    input.add(b"\x00", 1);
    input.add(b"\x00\x00", 2);
    input.add(b"\x00\x00\x00", 3);

    let table = build_with_rng(input, &BuildConfig::default(), &mut rng(2)).unwrap();

    assert_eq!(*table.lookup(b"\x00").unwrap().payload, 1);
    assert_eq!(*table.lookup(b"\x00\x00").unwrap().payload, 2);
    assert_eq!(*table.lookup(b"\x00\x00\x00").unwrap().payload, 3);
    assert!(table.lookup(b"\x00\x00\x00\x00").is_none());
    assert!(table.lookup(b"").is_none());
}

/// E4: recycle, then build again from the recovered input set.
#[test]
fn e4_recycle_and_rebuild() {
    let mut input: InputSet<'_, usize> = InputSet::new();
    let keys: Vec<Vec<u8>> = (0..10).map(|i| format!("key-{i}").into_bytes()).collect();
    for (i, k) in keys.iter().enumerate() {
        input.add(k, i);
    }

    let table1 = build_with_rng(input, &BuildConfig::default(), &mut rng(10)).unwrap();
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(*table1.lookup(k).unwrap().payload, i);
    }

    let recovered = table1.recycle();
    assert_eq!(recovered.size(), keys.len());

    let table2 = build_with_rng(recovered, &BuildConfig::default(), &mut rng(11)).unwrap();
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(*table2.lookup(k).unwrap().payload, i);
    }
}

/// E5: a single key.
#[test]
fn e5_single_key() {
    let mut input: InputSet<'_, ()> = InputSet::new();
    input.add(b"x", ());

    let table = build_with_rng(input, &BuildConfig::default(), &mut rng(3)).unwrap();

    assert_eq!(table.size(), 1);
    assert!(table.lookup(b"x").is_some());
    assert!(table.lookup(b"y").is_none());
    assert!(table.lookup(b"xy").is_none());
}

/// E6: a query longer than both frozen salts is a miss; no PRNG draw is
/// possible since `lookup` never takes one.
#[test]
fn e6_overlong_query_is_a_miss() {
    let mut input: InputSet<'_, ()> = InputSet::new();
    input.add(b"ab", ());
    input.add(b"cd", ());

    let table = build_with_rng(input, &BuildConfig::default(), &mut rng(4)).unwrap();

    assert!(table.lookup(b"abcdef").is_none());
}

/// Invariant 1 (bijection) + invariant 2 (non-membership rejection) over a
/// mid-size random key set.
#[test]
fn bijection_and_non_membership() {
    let mut input: InputSet<'_, u32> = InputSet::new();
    let keys: Vec<Vec<u8>> = (0..500u32).map(|i| format!("item-{i:05}").into_bytes()).collect();
    for (i, k) in keys.iter().enumerate() {
        input.add(k, i as u32);
    }

    let table = build_with_rng(input, &BuildConfig::default(), &mut rng(99)).unwrap();

    let mut slots = HashSet::new();
    for (i, k) in keys.iter().enumerate() {
        let r = table.lookup(k).unwrap();
        assert_eq!(*r.payload, i as u32);
        slots.insert(r.payload);
    }
    assert_eq!(slots.len(), keys.len());

    for i in 0..200u32 {
        let q = format!("not-present-{i:05}").into_bytes();
        assert!(table.lookup(&q).is_none());
    }
}

/// Invariant 6: identical PRNG seed + identical insertion order produces
/// an identical table shape.
#[test]
fn determinism_under_fixed_seed() {
    let make = || {
        let mut input: InputSet<'_, ()> = InputSet::new();
        for i in 0..50 {
            input.add(format!("k{i}").as_bytes(), ());
        }
        build_with_rng(input, &BuildConfig::default(), &mut rng(55)).unwrap()
    };
    let a = make();
    let b = make();
    assert_eq!(a.order(), b.order());
    assert_eq!(a.values(), b.values());
}

/// Boundary case: `|S| = 0` fails.
#[test]
fn empty_input_is_a_build_failure() {
    let input: InputSet<'_, ()> = InputSet::new();
    let err = build_with_rng(input, &BuildConfig::default(), &mut rng(6)).unwrap_err();
    assert!(matches!(err.kind, chm_hash::HashError::EmptyInput));
    assert_eq!(err.input.size(), 0);
}
