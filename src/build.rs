//! The build loop: drives retries over reseeded hash functions and a
//! growing graph until the acyclicity resolver succeeds or the iteration
//! ceiling is hit.

use crate::error::HashError;
use crate::graph::Graph;
use crate::hashfn::HashFn;
use crate::input::InputSet;
use crate::resolve::resolve;
use crate::rng::{ProcessRng, RngSource};
use crate::stats::BuildStats;
use crate::table::Table;

/// Tunable constants for the build loop.
#[derive(Debug, Clone, Copy)]
pub struct BuildConfig {
    /// Cap on the graph order, as a multiple of the initial order
    /// (`K + 1`). Hitting this cap aborts the build.
    pub n_max_mult: usize,
    /// Iterations between graph growths.
    pub grow_every: usize,
    /// Fractional growth factor numerator.
    pub grow_mul: u64,
    /// Fractional growth factor denominator.
    pub grow_div: u64,
    /// Per-vertex adjacency pre-allocation (`P`). Pure memory/time
    /// trade-off; never changes which table is built.
    pub adjacency_prealloc: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            n_max_mult: 650,
            grow_every: 5,
            grow_mul: 1075,
            grow_div: 1024,
            adjacency_prealloc: 0,
        }
    }
}

/// Returned on a failed build: the reason, and the untouched input set so
/// the caller can retry (e.g. after tuning `BuildConfig`, or simply trying
/// again with fresh entropy).
#[derive(Debug)]
pub struct BuildFailure<'a, P> {
    pub kind: HashError,
    pub input: InputSet<'a, P>,
}

impl<'a, P> std::fmt::Display for BuildFailure<'a, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.kind, f)
    }
}

impl<'a, P: std::fmt::Debug> std::error::Error for BuildFailure<'a, P> {}

/// Build a minimal perfect hash table over every key in `input`, using the
/// process-wide ambient PRNG. On success, `input` is consumed and its
/// records move into the returned [`Table`]; on failure the original
/// `input` comes back inside [`BuildFailure`].
pub fn build<'a, P>(
    input: InputSet<'a, P>,
    cfg: &BuildConfig,
) -> Result<Table<'a, P>, BuildFailure<'a, P>> {
    build_with_rng(input, cfg, &mut ProcessRng)
}

/// Like [`build`], but with an explicit, caller-supplied source of
/// randomness — the hook tests use to pin the build trace (spec.md §8
/// invariant 6, "Determinism under fixed PRNG state").
pub fn build_with_rng<'a, P>(
    input: InputSet<'a, P>,
    cfg: &BuildConfig,
    rng: &mut dyn RngSource,
) -> Result<Table<'a, P>, BuildFailure<'a, P>> {
    let n_keys = input.size();
    if n_keys == 0 {
        return Err(BuildFailure {
            kind: HashError::EmptyInput,
            input,
        });
    }

    let mut n = n_keys + 1;
    let n_initial = n;
    let mut n_scaled: u64 = n as u64 * cfg.grow_div;

    let mut graph = Graph::new(cfg.adjacency_prealloc);
    graph.ensure_order(n);

    let mut f1 = HashFn::default();
    let mut f2 = HashFn::default();
    let mut stats = BuildStats::default();

    // spec.md §4.4 step 1: the cap bounds the graph *order* `n`, not the
    // iteration count. Growth is geometric, so bounding iterations instead
    // would let `n` (and `n_scaled`) climb without limit on an
    // adversarial/never-resolving input, eventually overflowing `n_scaled`
    // and handing `ensure_order` a garbage size.
    let n_ceiling = cfg.n_max_mult * n_initial;
    let mut iteration: usize = 0;

    loop {
        if iteration > 0 && iteration % cfg.grow_every == 0 {
            n_scaled = n_scaled * cfg.grow_mul / cfg.grow_div;
            let n_next = n_scaled / cfg.grow_div;
            if n_next > n {
                n = n_next;
            } else {
                n += 1;
            }

            if n >= n_ceiling {
                #[cfg(feature = "warnings")]
                eprintln!(
                    "WARNING: build ran for {} iterations (graph order would grow to {}, ceiling {}) without finding a solution",
                    iteration, n, n_ceiling
                );
                return Err(BuildFailure {
                    kind: HashError::BuildExceeded { iterations: iteration, n },
                    input,
                });
            }
            graph.ensure_order(n);
        }

        iteration += 1;
        stats.record_iteration();

        graph.wipe();
        f1.reset(n);
        f2.reset(n);

        // Pre-extend both salts to this iteration's longest key, then hash
        // every key read-only (optionally in parallel — see
        // `hash_all_keys`), preserving insertion order for the edges that
        // follow: spec.md §4.4 step 3 treats that order as part of the
        // resolver's observable input.
        let max_len = max_key_len(&input);
        f1.ensure_salt(max_len, rng, &mut stats);
        f2.ensure_salt(max_len, rng, &mut stats);

        let hashes = hash_all_keys(&input, &f1, &f2, &mut stats);

        for (i, (r1, r2)) in hashes.into_iter().enumerate() {
            graph.biconnect(r1, r2, i, &mut stats);
        }

        let resolved = resolve(&mut graph, &mut stats);
        stats.record_stack_depth(graph.stack_capacity() as u64);
        if resolved {
            break;
        }
    }

    #[cfg(debug_assertions)]
    self_check(&input, &f1, &f2, &graph);

    let value: Vec<usize> = graph.vertices().iter().map(|v| v.value as usize).collect();
    let adjacency_extrema = adjacency_min_max(&graph);
    stats.finish(graph.order(), adjacency_extrema);

    Ok(Table::new(input, f1, f2, value, stats))
}

fn max_key_len<P>(input: &InputSet<'_, P>) -> usize {
    let mut max_len = 0usize;
    input.for_each(|k, _| max_len = max_len.max(k.len()));
    max_len
}

#[cfg(feature = "parallel")]
fn hash_all_keys<P>(
    input: &InputSet<'_, P>,
    f1: &HashFn,
    f2: &HashFn,
    stats: &mut BuildStats,
) -> Vec<(usize, usize)> {
    use rayon::prelude::*;

    let mut keys: Vec<Vec<u8>> = Vec::with_capacity(input.size());
    input.for_each(|k, _| keys.push(k.to_vec()));

    let hashes = keys
        .par_iter()
        .map(|k| (f1.hash_ready(k), f2.hash_ready(k)))
        .collect();
    for _ in 0..keys.len() {
        stats.record_hash_invocation();
        stats.record_hash_invocation();
    }
    hashes
}

#[cfg(not(feature = "parallel"))]
fn hash_all_keys<P>(
    input: &InputSet<'_, P>,
    f1: &HashFn,
    f2: &HashFn,
    stats: &mut BuildStats,
) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(input.size());
    input.for_each(|k, _| {
        out.push((f1.hash_ready(k), f2.hash_ready(k)));
        stats.record_hash_invocation();
        stats.record_hash_invocation();
    });
    out
}

fn adjacency_min_max(graph: &Graph) -> (u64, u64) {
    let mut min = u64::MAX;
    let mut max = 0u64;
    for v in graph.vertices() {
        let len = v.edges.len() as u64;
        min = min.min(len);
        max = max.max(len);
    }
    if min == u64::MAX {
        min = 0;
    }
    (min, max)
}

/// Debug-only witness of correctness, spec.md §4.4 "Self-check
/// (debug-only)": re-derive every key's slot from the frozen hash
/// functions and the graph's vertex values, and confirm it equals that
/// key's insertion index.
#[cfg(debug_assertions)]
fn self_check<P>(input: &InputSet<'_, P>, f1: &HashFn, f2: &HashFn, graph: &Graph) {
    let n = graph.order() as i64;
    let mut i = 0i64;
    input.for_each(|key, _| {
        let r1 = f1.hash_frozen(key);
        let r2 = f2.hash_frozen(key);
        let v1 = graph.vertex(r1).value;
        let v2 = graph.vertex(r2).value;
        let v = ((v1 + v2) % n + n) % n;
        debug_assert_eq!(v, i, "self-check failed for key at index {i}");
        i += 1;
    });
}
