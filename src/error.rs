//!
//! Error type of HMM construction, evaluation and training
//!
use thiserror::Error;

///
/// Recoverable failures of the HMM engine.
///
/// None of these abort the process; the caller decides whether to retry
/// with other inputs (e.g. another sequence or an initial model).
///
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    /// Point length, symbol index or parameter shape does not fit the model
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Normalization of a distribution whose entries sum to zero
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// Zero-length sequence given where at least one point is needed
    #[error("empty sequence")]
    EmptySequence,

    /// Viterbi could not find any path with positive probability
    #[error("no path with positive probability")]
    NoViablePath,

    /// Model construction with no states
    #[error("model has no states")]
    EmptyModel,

    /// State index is not in `0..n_states`
    #[error("state index {index} is out of range (n_states={n_states})")]
    StateOutOfRange { index: usize, n_states: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;
