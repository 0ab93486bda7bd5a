//! Flat-file ledger store.

use crate::error::LedgerError;
use crate::record::{format_line, parse_document, HEADER};
use crate::store::traits::{LedgerReader, LedgerStore};
use crate::LedgerResult;
use async_trait::async_trait;
use levels::AggregatedLevel;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ledger backed by a single flat file.
///
/// The whole file is read on every operation and rewritten on append. The
/// ledger grows by one line per day and is touched every few hours at most,
/// so wholesale rewrites keep the last-write-wins replacement trivial.
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn read_all(&self) -> LedgerResult<Vec<AggregatedLevel>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => parse_document(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(LedgerError::from(e)),
        }
    }

    async fn write_all(&self, records: &[AggregatedLevel]) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut content = String::from(HEADER);
        content.push('\n');
        for record in records {
            content.push_str(&format_line(record));
            content.push('\n');
        }
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl LedgerReader for FileLedger {
    async fn latest(&self) -> LedgerResult<Option<AggregatedLevel>> {
        Ok(self.read_all().await?.into_iter().last())
    }
}

#[async_trait]
impl LedgerStore for FileLedger {
    async fn append(&self, record: &AggregatedLevel) -> LedgerResult<()> {
        let mut records = self.read_all().await?;

        let replaced = records.iter().any(|r| r.date == record.date);
        records.retain(|r| r.date != record.date);
        records.push(*record);
        // Re-running a past date must not move it to the end of the file,
        // where latest() would mistake it for the current record.
        records.sort_by_key(|r| r.date);
        self.write_all(&records).await?;

        if replaced {
            info!(date = %record.date, path = ?self.path, "Replaced ledger record");
        } else {
            info!(date = %record.date, path = ?self.path, "Appended ledger record");
        }
        Ok(())
    }

    async fn history(&self) -> LedgerResult<Vec<AggregatedLevel>> {
        let records = self.read_all().await?;
        debug!(count = records.len(), "Read ledger history");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, call_wall: f64) -> AggregatedLevel {
        AggregatedLevel {
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            call_wall,
            put_wall: 58_000.0,
            buyer_gamma_strike: 64_000.0,
            seller_gamma_strike: 60_000.0,
        }
    }

    fn scratch_ledger(tag: &str) -> FileLedger {
        let path = std::env::temp_dir().join(format!(
            "wallsync-ledger-{tag}-{}.csv",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        FileLedger::new(path)
    }

    #[tokio::test]
    async fn test_empty_ledger_has_no_latest() {
        let ledger = scratch_ledger("empty");
        assert!(ledger.latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_then_latest() {
        let ledger = scratch_ledger("append");
        ledger.append(&record(24, 64_000.0)).await.unwrap();
        ledger.append(&record(25, 65_000.0)).await.unwrap();

        let latest = ledger.latest().await.unwrap().unwrap();
        assert_eq!(latest, record(25, 65_000.0));
        assert_eq!(ledger.history().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_same_date_is_last_write_wins() {
        let ledger = scratch_ledger("lww");
        ledger.append(&record(25, 64_000.0)).await.unwrap();
        ledger.append(&record(25, 66_000.0)).await.unwrap();

        let history = ledger.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].call_wall, 66_000.0);
    }

    #[tokio::test]
    async fn test_rerunning_past_date_does_not_displace_latest() {
        let ledger = scratch_ledger("rerun");
        ledger.append(&record(24, 64_000.0)).await.unwrap();
        ledger.append(&record(25, 65_000.0)).await.unwrap();

        // Re-publish the older date; the newest date must stay current.
        ledger.append(&record(24, 64_500.0)).await.unwrap();

        let latest = ledger.latest().await.unwrap().unwrap();
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());

        let history = ledger.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].call_wall, 64_500.0);
    }

    #[tokio::test]
    async fn test_header_written_exactly_once() {
        let ledger = scratch_ledger("header");
        ledger.append(&record(24, 64_000.0)).await.unwrap();
        ledger.append(&record(25, 65_000.0)).await.unwrap();

        let content = std::fs::read_to_string(&ledger.path).unwrap();
        let headers = content.lines().filter(|l| *l == HEADER).count();
        assert_eq!(headers, 1);
        assert!(content.starts_with(HEADER));
    }
}
