//! The four indicator input fields and their matching heuristics.

use levels::AggregatedLevel;
use std::fmt;

/// One of the four level inputs on the indicator's configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelField {
    CallWall,
    PutWall,
    BuyerGamma,
    SellerGamma,
}

impl LevelField {
    /// Field order, which doubles as the positional fallback order.
    pub const ALL: [LevelField; 4] = [
        LevelField::CallWall,
        LevelField::PutWall,
        LevelField::BuyerGamma,
        LevelField::SellerGamma,
    ];

    /// Label fragments that identify this field's input, matched
    /// case-insensitively against nearby label text.
    pub fn label_fragments(&self) -> &'static [&'static str] {
        match self {
            LevelField::CallWall => &["resistance", "high"],
            LevelField::PutWall => &["support", "low"],
            LevelField::BuyerGamma => &["buyer"],
            LevelField::SellerGamma => &["seller"],
        }
    }

    /// The value this field takes from a level record.
    pub fn value(&self, record: &AggregatedLevel) -> f64 {
        match self {
            LevelField::CallWall => record.call_wall,
            LevelField::PutWall => record.put_wall,
            LevelField::BuyerGamma => record.buyer_gamma_strike,
            LevelField::SellerGamma => record.seller_gamma_strike,
        }
    }
}

impl fmt::Display for LevelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LevelField::CallWall => "call wall",
            LevelField::PutWall => "put wall",
            LevelField::BuyerGamma => "buyer gamma",
            LevelField::SellerGamma => "seller gamma",
        };
        write!(f, "{name}")
    }
}
