//! Level aggregation engine.
//!
//! A pure, single-pass, deterministic reduction from a snapshot set to one
//! [`AggregatedLevel`]. No I/O, no state, safe to re-run idempotently.

use crate::error::LevelsError;
use crate::types::{AggregatedLevel, GexParams, InstrumentSnapshot, OptionType};
use crate::LevelsResult;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use tracing::debug;

/// Reduce a snapshot set to one level record for `date`.
///
/// Fails with [`LevelsError::InsufficientData`] if the set is empty or
/// contains no call or no put contracts, since the corresponding wall
/// cannot be computed.
///
/// Tie-breaking is deterministic:
/// - call wall: equal max open interest resolves to the lowest strike
///   (favors the nearer resistance)
/// - put wall: equal max open interest resolves to the highest strike
///   (favors the nearer support)
/// - buyer/seller gamma strikes: equal net exposure resolves to the lowest
///   strike
pub fn aggregate(
    snapshots: &[InstrumentSnapshot],
    date: NaiveDate,
    params: &GexParams,
) -> LevelsResult<AggregatedLevel> {
    if snapshots.is_empty() {
        return Err(LevelsError::InsufficientData(
            "empty snapshot set".to_string(),
        ));
    }

    let call_wall = wall(snapshots, OptionType::Call)?;
    let put_wall = wall(snapshots, OptionType::Put)?;

    // Net gamma exposure per strike, over both option types. BTreeMap keyed
    // by ordered strike gives a stable ascending scan, which is what makes
    // the lowest-strike tie-break independent of input order.
    let mut net_exposure: BTreeMap<OrderedFloat<f64>, f64> = BTreeMap::new();
    for snap in snapshots {
        let exposure = snap.option_type.exposure_sign()
            * snap.gamma
            * snap.open_interest
            * snap.underlying_price.powi(2)
            * params.contract_multiplier
            / params.scaling_factor;
        *net_exposure.entry(OrderedFloat(snap.strike)).or_insert(0.0) += exposure;
    }

    let mut buyer = (f64::NAN, f64::NEG_INFINITY);
    let mut seller = (f64::NAN, f64::INFINITY);
    for (strike, exposure) in &net_exposure {
        if *exposure > buyer.1 {
            buyer = (strike.into_inner(), *exposure);
        }
        if *exposure < seller.1 {
            seller = (strike.into_inner(), *exposure);
        }
    }

    debug!(
        contracts = snapshots.len(),
        call_wall,
        put_wall,
        buyer_gamma_strike = buyer.0,
        seller_gamma_strike = seller.0,
        "Aggregated level record"
    );

    Ok(AggregatedLevel {
        date,
        call_wall,
        put_wall,
        buyer_gamma_strike: buyer.0,
        seller_gamma_strike: seller.0,
    })
}

/// Strike carrying the maximum open interest among contracts of `side`.
fn wall(snapshots: &[InstrumentSnapshot], side: OptionType) -> LevelsResult<f64> {
    let mut best: Option<(f64, f64)> = None; // (strike, open_interest)

    for snap in snapshots.iter().filter(|s| s.option_type == side) {
        best = Some(match best {
            None => (snap.strike, snap.open_interest),
            Some((strike, oi)) => {
                if snap.open_interest > oi {
                    (snap.strike, snap.open_interest)
                } else if snap.open_interest == oi && nearer(side, snap.strike, strike) {
                    (snap.strike, snap.open_interest)
                } else {
                    (strike, oi)
                }
            }
        });
    }

    best.map(|(strike, _)| strike).ok_or_else(|| {
        let side = match side {
            OptionType::Call => "call",
            OptionType::Put => "put",
        };
        LevelsError::InsufficientData(format!("no {side} contracts in snapshot set"))
    })
}

/// Tie-break preference: calls resolve downward (nearer resistance), puts
/// resolve upward (nearer support).
fn nearer(side: OptionType, candidate: f64, incumbent: f64) -> bool {
    match side {
        OptionType::Call => candidate < incumbent,
        OptionType::Put => candidate > incumbent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn snap(option_type: OptionType, strike: f64, open_interest: f64, gamma: f64) -> InstrumentSnapshot {
        InstrumentSnapshot {
            strike,
            expiry: NaiveDate::from_ymd_opt(2026, 9, 25).unwrap(),
            option_type,
            open_interest,
            gamma,
            underlying_price: 100.0,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn unit_params() -> GexParams {
        GexParams {
            contract_multiplier: 1.0,
            scaling_factor: 1.0,
        }
    }

    #[test]
    fn test_empty_set_is_insufficient() {
        let result = aggregate(&[], date(), &unit_params());
        assert_matches!(result, Err(LevelsError::InsufficientData(_)));
    }

    #[test]
    fn test_missing_side_is_insufficient() {
        let calls_only = vec![snap(OptionType::Call, 100.0, 10.0, 0.01)];
        assert_matches!(
            aggregate(&calls_only, date(), &unit_params()),
            Err(LevelsError::InsufficientData(_))
        );

        let puts_only = vec![snap(OptionType::Put, 90.0, 10.0, 0.01)];
        assert_matches!(
            aggregate(&puts_only, date(), &unit_params()),
            Err(LevelsError::InsufficientData(_))
        );
    }

    #[test]
    fn test_walls_are_members_of_input_strikes() {
        let snapshots = vec![
            snap(OptionType::Call, 101.0, 40.0, 0.01),
            snap(OptionType::Call, 104.5, 70.0, 0.01),
            snap(OptionType::Put, 92.5, 55.0, 0.01),
            snap(OptionType::Put, 97.0, 20.0, 0.01),
        ];
        let level = aggregate(&snapshots, date(), &unit_params()).unwrap();

        let strikes: Vec<f64> = snapshots.iter().map(|s| s.strike).collect();
        assert!(strikes.contains(&level.call_wall));
        assert!(strikes.contains(&level.put_wall));
        assert!(strikes.contains(&level.buyer_gamma_strike));
        assert!(strikes.contains(&level.seller_gamma_strike));
    }

    #[test]
    fn test_call_wall_tie_breaks_to_lowest_strike() {
        let snapshots = vec![
            snap(OptionType::Call, 102.0, 500.0, 0.01),
            snap(OptionType::Call, 100.0, 500.0, 0.01),
            snap(OptionType::Put, 90.0, 100.0, 0.01),
        ];
        let level = aggregate(&snapshots, date(), &unit_params()).unwrap();
        assert_eq!(level.call_wall, 100.0);
    }

    #[test]
    fn test_put_wall_tie_breaks_to_highest_strike() {
        let snapshots = vec![
            snap(OptionType::Call, 100.0, 100.0, 0.01),
            snap(OptionType::Put, 90.0, 300.0, 0.01),
            snap(OptionType::Put, 95.0, 300.0, 0.01),
        ];
        let level = aggregate(&snapshots, date(), &unit_params()).unwrap();
        assert_eq!(level.put_wall, 95.0);
    }

    #[test]
    fn test_gamma_strike_tie_breaks_to_lowest_strike() {
        // Two strikes with identical positive net exposure; the lower wins.
        let snapshots = vec![
            snap(OptionType::Call, 100.0, 10.0, 0.02),
            snap(OptionType::Call, 110.0, 10.0, 0.02),
            snap(OptionType::Put, 90.0, 10.0, 0.02),
            snap(OptionType::Put, 95.0, 10.0, 0.02),
        ];
        let level = aggregate(&snapshots, date(), &unit_params()).unwrap();
        assert_eq!(level.buyer_gamma_strike, 100.0);
        assert_eq!(level.seller_gamma_strike, 90.0);
    }

    #[test]
    fn test_sign_applied_from_type_not_feed() {
        // Feed arrives with put gamma already signed negative. The formula
        // applies sign(option_type) to whatever the feed supplied, so this
        // put contributes sign(Put) * (-0.01) * 20 * 100^2 = +2000.
        let snapshots = vec![
            snap(OptionType::Call, 100.0, 10.0, 0.01),
            snap(OptionType::Put, 90.0, 20.0, -0.01),
        ];
        let level = aggregate(&snapshots, date(), &unit_params()).unwrap();
        assert_eq!(level.buyer_gamma_strike, 90.0);
        assert_eq!(level.seller_gamma_strike, 100.0);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let snapshots = vec![
            snap(OptionType::Call, 100.0, 500.0, 0.012),
            snap(OptionType::Call, 105.0, 800.0, 0.009),
            snap(OptionType::Put, 90.0, 300.0, 0.014),
            snap(OptionType::Put, 95.0, 900.0, 0.011),
        ];
        let params = GexParams::default();
        let first = aggregate(&snapshots, date(), &params).unwrap();
        let second = aggregate(&snapshots, date(), &params).unwrap();
        assert_eq!(first, second);

        // Input order must not matter either.
        let mut reversed = snapshots.clone();
        reversed.reverse();
        let third = aggregate(&reversed, date(), &params).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_end_to_end_scenario() {
        // Uniform per-contract gamma, fixed underlying, fixed constants.
        let snapshots = vec![
            snap(OptionType::Call, 100.0, 500.0, 0.01),
            snap(OptionType::Call, 105.0, 800.0, 0.01),
            snap(OptionType::Put, 90.0, 300.0, 0.01),
            snap(OptionType::Put, 95.0, 900.0, 0.01),
        ];
        let level = aggregate(&snapshots, date(), &unit_params()).unwrap();

        assert_eq!(level.call_wall, 105.0);
        assert_eq!(level.put_wall, 95.0);
        // Net exposures: +50k @100, +80k @105, -30k @90, -90k @95.
        assert_eq!(level.buyer_gamma_strike, 105.0);
        assert_eq!(level.seller_gamma_strike, 95.0);
        assert_eq!(level.date, date());
    }

    #[test]
    fn test_scaling_factor_does_not_move_strikes() {
        let snapshots = vec![
            snap(OptionType::Call, 100.0, 500.0, 0.01),
            snap(OptionType::Call, 105.0, 800.0, 0.01),
            snap(OptionType::Put, 90.0, 300.0, 0.01),
            snap(OptionType::Put, 95.0, 900.0, 0.01),
        ];
        let scaled = aggregate(&snapshots, date(), &GexParams::default()).unwrap();
        let unscaled = aggregate(&snapshots, date(), &unit_params()).unwrap();
        // Scaling changes magnitudes, not which strike carries the extremum.
        assert_eq!(scaled, unscaled);
    }
}
