//! The synchronization client.

use crate::observer::StatusObserver;
use crate::state::ClientSyncState;
use automation::AutomationDriver;
use chrono::Utc;
use ledger::LedgerReader;
use levels::AggregatedLevel;
use metrics::counter;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// Outcome of one `check_and_sync` invocation.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Another attempt is in flight; this invocation did nothing.
    Busy,
    /// Ledger matches the last applied record (or is still empty).
    NoChange,
    /// The record was fully propagated into the host UI.
    Applied(AggregatedLevel),
    /// The ledger was unreachable or malformed; retried next cycle.
    LedgerFailed(String),
    /// The automation attempt failed; the same record is retried next cycle.
    AutomationFailed(String),
}

impl SyncOutcome {
    fn kind(&self) -> &'static str {
        match self {
            SyncOutcome::Busy => "busy",
            SyncOutcome::NoChange => "no_change",
            SyncOutcome::Applied(_) => "applied",
            SyncOutcome::LedgerFailed(_) => "ledger_failed",
            SyncOutcome::AutomationFailed(_) => "automation_failed",
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Busy => write!(f, "skipped: attempt already in flight"),
            SyncOutcome::NoChange => write!(f, "no change"),
            SyncOutcome::Applied(record) => write!(f, "applied record for {}", record.date),
            SyncOutcome::LedgerFailed(reason) => write!(f, "ledger failed: {reason}"),
            SyncOutcome::AutomationFailed(reason) => write!(f, "automation failed: {reason}"),
        }
    }
}

/// Non-reentrant lock over the sync sequence.
///
/// Acquisition is a single atomic compare-and-set; release happens on drop
/// on every exit path, so a panicking cycle cannot wedge the client.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Polls the ledger and propagates new records into the charting host.
pub struct SyncClient {
    reader: Arc<dyn LedgerReader>,
    driver: AutomationDriver,
    observer: Arc<dyn StatusObserver>,
    state: Mutex<ClientSyncState>,
    in_flight: AtomicBool,
}

impl SyncClient {
    pub fn new(
        reader: Arc<dyn LedgerReader>,
        driver: AutomationDriver,
        observer: Arc<dyn StatusObserver>,
    ) -> Self {
        Self {
            reader,
            driver,
            observer,
            state: Mutex::new(ClientSyncState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The single entry point for both the timer and the manual trigger.
    ///
    /// At most one invocation runs at a time; losers of the guard race
    /// return [`SyncOutcome::Busy`] without touching ledger or host.
    pub async fn check_and_sync(&self) -> SyncOutcome {
        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            let outcome = SyncOutcome::Busy;
            self.observer.record(&outcome, Utc::now());
            counter!("sync_cycles_total", "outcome" => outcome.kind()).increment(1);
            return outcome;
        };

        self.state.lock().last_attempt = Some(Utc::now());
        let outcome = self.cycle().await;

        counter!("sync_cycles_total", "outcome" => outcome.kind()).increment(1);
        self.observer.record(&outcome, Utc::now());
        outcome
    }

    async fn cycle(&self) -> SyncOutcome {
        let latest = match self.reader.latest().await {
            Ok(Some(record)) => record,
            Ok(None) => return SyncOutcome::NoChange,
            Err(e) => return SyncOutcome::LedgerFailed(e.to_string()),
        };

        if self.state.lock().last_applied.as_ref() == Some(&latest) {
            return SyncOutcome::NoChange;
        }

        match self.driver.apply(&latest).await {
            Ok(_report) => {
                self.state.lock().last_applied = Some(latest);
                SyncOutcome::Applied(latest)
            }
            // last_applied stays untouched so the identical record is
            // retried verbatim on the next cycle.
            Err(e) => SyncOutcome::AutomationFailed(e.to_string()),
        }
    }

    /// Run the poll loop: one immediate cycle, then one per interval, until
    /// the shutdown channel flips.
    pub async fn run(&self, poll_interval: Duration, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = poll_interval.as_secs(), "Starting sync client");

        self.check_and_sync().await;

        let mut timer = tokio::time::interval(poll_interval);
        timer.tick().await; // first tick fires immediately; already ran

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    self.check_and_sync().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Sync client shutting down");
                        return;
                    }
                }
            }
        }
    }

    pub fn last_applied(&self) -> Option<AggregatedLevel> {
        self.state.lock().last_applied
    }

    pub fn last_attempt(&self) -> Option<chrono::DateTime<Utc>> {
        self.state.lock().last_attempt
    }
}
