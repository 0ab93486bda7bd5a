//! # Levels Crate
//!
//! Domain types and the level aggregation engine for WallSync. This crate is
//! the foundation the feed, ledger, and sync crates build on.
//!
//! ## Key Components
//!
//! - **Domain Types**: [`InstrumentSnapshot`], [`AggregatedLevel`],
//!   [`OptionType`], [`GexParams`]
//! - **Engine**: [`aggregate`] - pure reduction from a snapshot set to one
//!   dated level record
//!
//! ## Key Invariants
//!
//! - The engine performs no I/O and holds no state - same input, same output
//! - Call/put walls are always members of the observed strike set, never
//!   interpolated
//! - Gamma exposure sign is derived from the option type, never trusted from
//!   the feed

pub mod engine;
pub mod error;
pub mod types;

pub use engine::aggregate;
pub use error::LevelsError;
pub use types::{AggregatedLevel, GexParams, InstrumentSnapshot, OptionType};

pub type LevelsResult<T> = std::result::Result<T, LevelsError>;
