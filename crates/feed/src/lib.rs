//! # Feed Crate
//!
//! Market data source client for WallSync. Fetches the active options chain
//! for an underlying and normalizes it into [`levels::InstrumentSnapshot`]
//! values.
//!
//! The feed is behind the [`InstrumentFeed`] trait so the aggregation
//! pipeline never imports transport details; [`HttpInstrumentFeed`] is the
//! production adapter and [`StaticInstrumentFeed`] serves tests and dry
//! runs.
//!
//! The feed does not retry internally - the scheduler that triggers
//! aggregation runs owns retry policy.

pub mod client;
pub mod error;
pub mod listing;

pub use client::{HttpInstrumentFeed, InstrumentFeed, StaticInstrumentFeed};
pub use error::FeedError;
pub use listing::{InstrumentListing, ListedInstrument};

pub type FeedResult<T> = std::result::Result<T, FeedError>;
