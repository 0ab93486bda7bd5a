//! Error types for the feed crate.

use thiserror::Error;

/// Errors that can occur while fetching the options chain.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The request could not be sent or the connection failed.
    #[error("Feed request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("Feed returned status {0}")]
    Status(u16),

    /// The response body could not be decoded as an instrument listing.
    #[error("Feed response decode failed: {0}")]
    Decode(String),

    /// The listing decoded but cannot be normalized (e.g. non-positive
    /// underlying price).
    #[error("Feed listing invalid: {0}")]
    Invalid(String),
}
