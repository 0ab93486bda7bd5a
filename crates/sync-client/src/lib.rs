//! # Sync Client Crate
//!
//! The synchronization client: polls the distribution ledger, diffs the
//! latest record against the last one successfully applied, and drives the
//! automation driver when they differ.
//!
//! ## Key Invariants
//!
//! - Timer and manual-trigger paths funnel through one `check_and_sync`
//!   entry point guarded by an atomic non-reentrant lock, so two racing
//!   invocations can never overlap against the same live UI
//! - `last_applied` only advances on full automation success; a failed
//!   record is retried verbatim on the next cycle, indefinitely, at the
//!   same cadence
//! - Ledger and automation failures are reported and retried, never fatal

pub mod client;
pub mod observer;
pub mod state;

pub use client::{SyncClient, SyncOutcome};
pub use observer::{LogStatusObserver, StatusObserver};
pub use state::ClientSyncState;
