//! Wire types for the instrument listing endpoint.

use crate::error::FeedError;
use crate::FeedResult;
use chrono::NaiveDate;
use levels::{InstrumentSnapshot, OptionType};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One contract row as the endpoint reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedInstrument {
    pub strike: f64,
    pub expiry: NaiveDate,
    pub option_type: OptionType,
    pub open_interest: f64,
    pub gamma: f64,
}

/// Full listing for one underlying: all active contracts plus the single
/// underlying quote taken at listing time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentListing {
    pub underlying_price: f64,
    pub instruments: Vec<ListedInstrument>,
}

impl InstrumentListing {
    /// Normalize the listing into snapshots, stamping the shared underlying
    /// price onto every contract.
    ///
    /// Rows with a non-positive strike or negative open interest are dropped
    /// with a warning rather than failing the whole listing; the feed is
    /// eventually consistent and a handful of bad rows is routine.
    pub fn into_snapshots(self) -> FeedResult<Vec<InstrumentSnapshot>> {
        if self.underlying_price <= 0.0 {
            return Err(FeedError::Invalid(format!(
                "non-positive underlying price: {}",
                self.underlying_price
            )));
        }

        let mut snapshots = Vec::with_capacity(self.instruments.len());
        for row in self.instruments {
            if row.strike <= 0.0 || row.open_interest < 0.0 {
                warn!(
                    strike = row.strike,
                    open_interest = row.open_interest,
                    "Dropping malformed listing row"
                );
                continue;
            }
            snapshots.push(InstrumentSnapshot {
                strike: row.strike,
                expiry: row.expiry,
                option_type: row.option_type,
                open_interest: row.open_interest,
                gamma: row.gamma,
                underlying_price: self.underlying_price,
            });
        }
        Ok(snapshots)
    }
}
