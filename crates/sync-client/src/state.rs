//! Client-local synchronization state.

use chrono::{DateTime, Utc};
use levels::AggregatedLevel;

/// State owned exclusively by one [`crate::SyncClient`] for its process
/// lifetime. Re-initialized empty on restart, which at worst causes one
/// redundant re-apply of the current record.
#[derive(Debug, Default, Clone)]
pub struct ClientSyncState {
    /// Most recent record successfully reflected in the host UI.
    pub last_applied: Option<AggregatedLevel>,
    /// When the client last ran a (non-skipped) cycle.
    pub last_attempt: Option<DateTime<Utc>>,
}
