//! chm_hash — minimal perfect hashing via the Czech, Havas, Majewski
//! (CHM) random-graph construction.
//!
//! - Build once over a set of unique byte-string keys.
//! - O(1) lookups: key -> unique index in `[0, K)`.
//! - Robust: if a build attempt's graph has a cycle, reseed and retry,
//!   growing the graph on a fixed schedule until it succeeds or a
//!   configured iteration ceiling is hit.

mod build;
mod error;
mod graph;
mod hashfn;
mod input;
mod resolve;
mod rng;
mod stats;
mod table;

pub use build::{build, build_with_rng, BuildConfig, BuildFailure};
pub use error::HashError;
pub use input::InputSet;
pub use rng::{seed_global, ProcessRng, RngSource, StdRngSource};
pub use stats::BuildStats;
pub use table::{LookupResult, Table};
