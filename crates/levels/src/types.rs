//! Shared domain types for level aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Fixed exposure sign convention: calls positive, puts negative.
    ///
    /// The sign is always re-derived here rather than trusted from the feed,
    /// so an upstream convention change cannot silently invert the buyer and
    /// seller gamma strikes.
    pub fn exposure_sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

/// Normalized view of one options contract at aggregation time.
///
/// Constructed fresh per run from the feed, immutable, discarded after the
/// run. `underlying_price` is the single quote shared by the whole set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSnapshot {
    pub strike: f64,
    pub expiry: NaiveDate,
    pub option_type: OptionType,
    pub open_interest: f64,
    pub gamma: f64,
    pub underlying_price: f64,
}

/// Configuration constants for the net gamma exposure formula.
///
/// Externally supplied (config file), not hand-picked per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GexParams {
    /// Units of underlying per contract (1.0 for coin-denominated contracts,
    /// 100.0 for equity-style).
    pub contract_multiplier: f64,
    /// Divisor applied to the summed exposure to keep magnitudes readable.
    pub scaling_factor: f64,
}

impl Default for GexParams {
    fn default() -> Self {
        Self {
            contract_multiplier: 1.0,
            scaling_factor: 1_000_000_000.0,
        }
    }
}

/// One published level record, keyed by calendar date.
///
/// `call_wall` and `put_wall` are members of the strike set observed in the
/// run that produced the record. Once appended to the ledger a record is
/// immutable; re-running a date replaces it wholesale (last-write-wins).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedLevel {
    pub date: NaiveDate,
    /// Strike with maximum call open interest - modeled resistance.
    pub call_wall: f64,
    /// Strike with maximum put open interest - modeled support.
    pub put_wall: f64,
    /// Strike with the most positive net gamma exposure.
    pub buyer_gamma_strike: f64,
    /// Strike with the most negative net gamma exposure.
    pub seller_gamma_strike: f64,
}
