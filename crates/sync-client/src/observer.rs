//! Status surfacing for sync cycles.
//!
//! Every cycle outcome - success, no-change, each failure kind - goes
//! through a [`StatusObserver`] with a timestamp and human-readable reason.
//! Nothing is silently swallowed.

use crate::client::SyncOutcome;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Local observer of sync cycle outcomes (status panel, log, notification).
pub trait StatusObserver: Send + Sync {
    fn record(&self, outcome: &SyncOutcome, at: DateTime<Utc>);
}

/// Default observer: structured log events.
#[derive(Debug, Default)]
pub struct LogStatusObserver;

impl StatusObserver for LogStatusObserver {
    fn record(&self, outcome: &SyncOutcome, at: DateTime<Utc>) {
        match outcome {
            SyncOutcome::Applied(record) => {
                info!(at = %at, date = %record.date, "Sync cycle: applied new record")
            }
            SyncOutcome::NoChange => info!(at = %at, "Sync cycle: no change"),
            SyncOutcome::Busy => info!(at = %at, "Sync cycle skipped: previous attempt in flight"),
            SyncOutcome::LedgerFailed(reason) => {
                warn!(at = %at, %reason, "Sync cycle: ledger fetch failed, will retry")
            }
            SyncOutcome::AutomationFailed(reason) => {
                warn!(at = %at, %reason, "Sync cycle: automation failed, will retry")
            }
        }
    }
}
