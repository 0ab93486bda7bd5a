//! Error types for the levels crate.

use thiserror::Error;

/// Errors that can occur during level aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelsError {
    /// The snapshot set cannot support the full level computation.
    /// Fatal to the current run only; the scheduler skips appending a
    /// record for the cycle rather than publishing a degenerate one.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
