//! Line codec for the ledger record format.
//!
//! One line per date, fields in fixed order:
//!
//! ```text
//! date,call_wall,put_wall,buyer_gamma,seller_gamma
//! 25/08/2026,65000,58000,64000,60000
//! ```
//!
//! Dates are `DD/MM/YYYY`; numeric fields use Rust's shortest round-trip
//! `f64` formatting, so format-then-parse yields the identical record.

use crate::error::LedgerError;
use crate::LedgerResult;
use chrono::NaiveDate;
use levels::AggregatedLevel;

/// Header row, written exactly once at the top of the file.
pub const HEADER: &str = "date,call_wall,put_wall,buyer_gamma,seller_gamma";

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Format one record as a ledger line (no trailing newline).
pub fn format_line(record: &AggregatedLevel) -> String {
    format!(
        "{},{},{},{},{}",
        record.date.format(DATE_FORMAT),
        record.call_wall,
        record.put_wall,
        record.buyer_gamma_strike,
        record.seller_gamma_strike,
    )
}

/// Parse one ledger line into a record.
pub fn parse_line(line: &str) -> LedgerResult<AggregatedLevel> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(LedgerError::Malformed(format!(
            "expected 5 fields, got {}: {line:?}",
            fields.len()
        )));
    }

    let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT)
        .map_err(|e| LedgerError::Malformed(format!("bad date {:?}: {e}", fields[0])))?;

    let mut values = [0.0_f64; 4];
    for (slot, field) in values.iter_mut().zip(&fields[1..]) {
        *slot = field
            .parse()
            .map_err(|e| LedgerError::Malformed(format!("bad number {field:?}: {e}")))?;
    }

    Ok(AggregatedLevel {
        date,
        call_wall: values[0],
        put_wall: values[1],
        buyer_gamma_strike: values[2],
        seller_gamma_strike: values[3],
    })
}

/// Parse a whole ledger document: header row plus zero or more records.
///
/// Blank lines are tolerated; any other unparseable line is an error so a
/// truncated or corrupted ledger is reported rather than silently shortened.
pub fn parse_document(content: &str) -> LedgerResult<Vec<AggregatedLevel>> {
    let mut records = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line == HEADER {
            continue;
        }
        records.push(parse_line(line)?);
    }
    Ok(records)
}
