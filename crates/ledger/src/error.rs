//! Error types for the ledger crate.
//!
//! Everything here is recoverable by the caller: the producer retries on
//! its next scheduled run, the sync client on its next poll. Nothing in
//! this taxonomy should ever crash a process.

use thiserror::Error;

/// Errors that can occur reading or writing the ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// File read/write failed.
    #[error("Ledger I/O error: {0}")]
    Io(String),

    /// Remote ledger unreachable.
    #[error("Ledger fetch failed: {0}")]
    Http(String),

    /// Remote ledger answered with a non-success status.
    #[error("Ledger fetch returned status {0}")]
    Status(u16),

    /// A line did not parse as a level record.
    #[error("Malformed ledger line: {0}")]
    Malformed(String),
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}
