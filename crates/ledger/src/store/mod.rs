//! Ledger storage and polling adapters.

pub mod file;
pub mod http;
pub mod traits;

pub use file::FileLedger;
pub use http::HttpLedgerReader;
pub use traits::{LedgerReader, LedgerStore};
