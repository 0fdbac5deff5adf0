use thiserror::Error;

/// Failure modes for [`crate::build::build`].
///
/// A zero-length key is never represented here: it is silently dropped at
/// [`crate::input::InputSet::add`] time (with a warning, see the `warnings`
/// feature) and never reaches the build loop. A lookup miss is likewise not
/// an error — see [`crate::table::Table::lookup`], which returns `None`.
#[derive(Debug, Error)]
pub enum HashError {
    /// `build()` was called with zero keys.
    #[error("cannot build a minimal perfect hash over zero keys")]
    EmptyInput,

    /// The iteration ceiling (`BuildConfig::n_max_mult` times the initial
    /// graph order) was reached without finding an acyclic graph.
    #[error(
        "build ran for {iterations} iterations (final graph order {n}) without finding an acyclic graph"
    )]
    BuildExceeded { iterations: usize, n: usize },
}
