//! Optional build-time diagnostics, spec.md §6 "Diagnostics (optional)".
//!
//! Gated behind the `stats` feature (mirroring the C source's
//! `-DHASH_STATISTICS` compile switch). Counters never affect behavior;
//! they exist to answer "how hard was this build" after the fact. All
//! counters are monotonic for the lifetime of a [`crate::table::Table`]
//! and are only reset by that table's destruction (i.e. never — a fresh
//! build starts a fresh `BuildStats`).
//!
//! Cumulative allocation byte totals (gross/net) are not tracked: without
//! a custom global allocator there is no honest way to attribute capacity
//! growth across the graph's adjacency lists, the two salts, and the
//! traversal stack to a single number, so the field is omitted rather than
//! populated with a guess. The per-structure reallocation counts/volumes
//! below are the faithful substitute.

#[cfg(feature = "stats")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildStats {
    pub iterations: u64,
    pub vertices_explored: u64,
    pub prng_draws: u64,
    pub hash_invocations: u64,
    pub final_graph_order: u64,
    pub traversal_stack_peak: u64,
    pub edge_reallocations: u64,
    pub edge_realloc_volume: u64,
    pub salt_reallocations: u64,
    pub salt_realloc_volume: u64,
    pub adjacency_min: u64,
    pub adjacency_max: u64,
}

#[cfg(feature = "stats")]
impl BuildStats {
    pub(crate) fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn record_vertex_explored(&mut self) {
        self.vertices_explored += 1;
    }

    /// `count` is the number of fresh salt entries actually drawn from the
    /// PRNG this call, not a per-call constant — a single `ensure_salt`
    /// draws one `u64` per new byte position.
    pub(crate) fn record_prng_draw(&mut self, count: u64) {
        self.prng_draws += count;
    }

    pub(crate) fn record_hash_invocation(&mut self) {
        self.hash_invocations += 1;
    }

    pub(crate) fn record_stack_depth(&mut self, depth: u64) {
        if depth > self.traversal_stack_peak {
            self.traversal_stack_peak = depth;
        }
    }

    pub(crate) fn record_edge_realloc(&mut self, added_capacity: u64) {
        self.edge_reallocations += 1;
        self.edge_realloc_volume += added_capacity;
    }

    pub(crate) fn record_salt_realloc(&mut self, added_capacity: u64) {
        self.salt_reallocations += 1;
        self.salt_realloc_volume += added_capacity;
    }

    pub(crate) fn finish(&mut self, n: usize, adjacency_extrema: (u64, u64)) {
        self.final_graph_order = n as u64;
        self.adjacency_min = adjacency_extrema.0;
        self.adjacency_max = adjacency_extrema.1;
    }
}

/// No-op stand-in used when the `stats` feature is disabled, so
/// `build::run` doesn't need two code paths.
#[cfg(not(feature = "stats"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildStats;

#[cfg(not(feature = "stats"))]
impl BuildStats {
    pub(crate) fn record_iteration(&mut self) {}
    pub(crate) fn record_vertex_explored(&mut self) {}
    pub(crate) fn record_prng_draw(&mut self, _count: u64) {}
    pub(crate) fn record_hash_invocation(&mut self) {}
    pub(crate) fn record_stack_depth(&mut self, _depth: u64) {}
    pub(crate) fn record_edge_realloc(&mut self, _added_capacity: u64) {}
    pub(crate) fn record_salt_realloc(&mut self, _added_capacity: u64) {}
    pub(crate) fn finish(&mut self, _n: usize, _adjacency_extrema: (u64, u64)) {}
}
