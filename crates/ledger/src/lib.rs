//! # Ledger Crate
//!
//! The distribution ledger bridging the aggregation run (producer) and the
//! synchronization client (consumer): append-only dated records, one line
//! per calendar date, in a fixed-order line format with a single header row.
//!
//! ## Key Components
//!
//! - **Codec**: [`record`] - format and parse the line format
//! - **Traits**: [`LedgerReader`] for consumers, [`LedgerStore`] for the
//!   producer
//! - **Adapters**: [`FileLedger`] (flat file, last-write-wins per date),
//!   [`HttpLedgerReader`] (poll with a cache-defeating parameter)
//!
//! The ledger is single-producer / single-consumer per deployment; there is
//! no write lock beyond last-write-wins per date.

pub mod error;
pub mod record;
pub mod store;

pub use error::LedgerError;
pub use record::{format_line, parse_document, parse_line, HEADER};
pub use store::{FileLedger, HttpLedgerReader, LedgerReader, LedgerStore};

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
