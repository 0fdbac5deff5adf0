use chm_hash::{build_with_rng, BuildConfig, InputSet, StdRngSource};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;

fn gen_unique_keys(n: usize, seed: u64) -> Vec<[u8; 16]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(n * 2);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let mut buf = [0u8; 16];
        rng.fill_bytes(&mut buf);
        if seen.insert(buf) {
            keys.push(buf);
        }
    }
    keys
}

fn bench_build(c: &mut Criterion) {
    let keys = gen_unique_keys(50_000, 1);
    c.bench_function("build 50k keys", |b| {
        b.iter(|| {
            let mut input: InputSet<'_, ()> = InputSet::new();
            for k in &keys {
                input.add(k, ());
            }
            let table = build_with_rng(
                input,
                &BuildConfig::default(),
                &mut StdRngSource::from_seed(1),
            )
            .unwrap();
            black_box(table.order());
        })
    });
}

fn bench_lookup(c: &mut Criterion) {
    let keys = gen_unique_keys(50_000, 2);
    let mut input: InputSet<'_, ()> = InputSet::new();
    for k in &keys {
        input.add(k, ());
    }
    let table = build_with_rng(
        input,
        &BuildConfig::default(),
        &mut StdRngSource::from_seed(2),
    )
    .unwrap();

    c.bench_function("lookup 50k keys", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for k in &keys {
                if table.lookup(k).is_some() {
                    found += 1;
                }
            }
            black_box(found);
        })
    });
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
