use chm_hash::{build_with_rng, BuildConfig, HashError, InputSet, StdRngSource};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::time::Instant;

const N_KEYS: usize = 1_000_000;
const GEN_SEED: u64 = 42;

fn main() -> Result<(), HashError> {
    println!("--- chm_hash million-key build ---");
    println!("n = {N_KEYS}");

    // 1) Generate unique keys
    let t0 = Instant::now();
    let keys = gen_unique_keys(N_KEYS, GEN_SEED);
    let gen_s = t0.elapsed().as_secs_f64();
    println!(
        "gen:    {:>8.3} s   ({:.1} M keys/s)",
        gen_s,
        N_KEYS as f64 / gen_s / 1e6
    );

    // 2) Fill the input set
    let t1 = Instant::now();
    let mut input: InputSet<'_, ()> = InputSet::new();
    input.reserve_total(N_KEYS);
    for k in &keys {
        input.add(k, ());
    }
    let fill_s = t1.elapsed().as_secs_f64();
    println!(
        "fill:   {:>8.3} s   ({:.1} M keys/s)",
        fill_s,
        N_KEYS as f64 / fill_s / 1e6
    );

    // 3) Build the table. The default `N_MAX_MULT`/`GROW_EVERY` schedule
    //    (spec.md §4.4) is generous enough for a million random 16-byte
    //    keys; raise `n_max_mult` if you feed it adversarial input.
    let cfg = BuildConfig::default();
    let t2 = Instant::now();
    let table = match build_with_rng(input, &cfg, &mut StdRngSource::from_seed(GEN_SEED)) {
        Ok(t) => t,
        Err(failure) => return Err(failure.kind),
    };
    let build_s = t2.elapsed().as_secs_f64();
    println!(
        "build:  {:>8.3} s   ({:.1} M keys/s)   (graph order {})",
        build_s,
        N_KEYS as f64 / build_s / 1e6,
        table.order()
    );

    // 4) Lookup all keys
    let t3 = Instant::now();
    // Split into chunks to avoid the compiler eliding the loop and to
    // avoid cache overheating.
    let mut found = 0u64;
    for chunk in keys.chunks(32_768) {
        for k in chunk {
            if table.lookup(k).is_some() {
                found += 1;
            }
        }
    }
    let lookup_s = t3.elapsed().as_secs_f64();
    println!(
        "lookup: {:>8.3} s   ({:.1} M lookups/s)   (found={found})",
        lookup_s,
        N_KEYS as f64 / lookup_s / 1e6
    );
    assert_eq!(found, N_KEYS as u64);

    println!("----------------------------------------------");
    println!(
        "Total (gen + fill + build + lookup): {:.3} s",
        gen_s + fill_s + build_s + lookup_s
    );

    Ok(())
}

/// Generate N unique 16-byte keys (raw bytes), deterministically.
fn gen_unique_keys(n: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = HashSet::with_capacity(n * 2);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let mut buf = [0u8; 16];
        rng.fill_bytes(&mut buf);
        if set.insert(buf) {
            keys.push(buf.to_vec());
        }
    }
    keys
}
