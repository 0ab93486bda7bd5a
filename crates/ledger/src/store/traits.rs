//! Ledger trait definitions.

use crate::LedgerResult;
use async_trait::async_trait;
use levels::AggregatedLevel;

/// Consumer-side view of the ledger: the latest published record.
///
/// The sync client only ever needs the current state; backtesting consumers
/// read full history through [`LedgerStore::history`] instead.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// The most recent record, or `None` for an empty ledger.
    async fn latest(&self) -> LedgerResult<Option<AggregatedLevel>>;
}

/// Producer-side view of the ledger.
#[async_trait]
pub trait LedgerStore: LedgerReader {
    /// Publish one dated record.
    ///
    /// If a record for the same date already exists it is replaced
    /// (last-write-wins per date); otherwise the record is appended. Never
    /// both.
    async fn append(&self, record: &AggregatedLevel) -> LedgerResult<()>;

    /// All records in file order.
    async fn history(&self) -> LedgerResult<Vec<AggregatedLevel>>;
}
