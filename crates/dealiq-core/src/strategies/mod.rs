//! Per-strategy deal metrics.
//!
//! Each submodule exposes a pure `metrics(price, assumptions)` function;
//! `analyze_strategy` is the validated, timed entry point that wraps the
//! result in the standard output envelope.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::error::DealIqError;
use crate::types::{with_metadata, ComputationOutput, Money, Strategy};
use crate::DealIqResult;

pub mod brrrr;
pub mod flip;
pub mod house_hack;
pub mod ltr;
pub mod str_rental;
pub mod wholesale;

pub use brrrr::BrrrrMetrics;
pub use flip::FlipMetrics;
pub use house_hack::HouseHackMetrics;
pub use ltr::LtrMetrics;
pub use str_rental::StrMetrics;
pub use wholesale::WholesaleMetrics;

/// Strategy metrics, tagged by strategy identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "metrics", rename_all = "snake_case")]
pub enum StrategyMetrics {
    Ltr(LtrMetrics),
    Str(StrMetrics),
    Brrrr(BrrrrMetrics),
    Flip(FlipMetrics),
    HouseHack(HouseHackMetrics),
    Wholesale(WholesaleMetrics),
}

impl StrategyMetrics {
    pub fn strategy(&self) -> Strategy {
        match self {
            StrategyMetrics::Ltr(_) => Strategy::LongTermRental,
            StrategyMetrics::Str(_) => Strategy::ShortTermRental,
            StrategyMetrics::Brrrr(_) => Strategy::Brrrr,
            StrategyMetrics::Flip(_) => Strategy::FixFlip,
            StrategyMetrics::HouseHack(_) => Strategy::HouseHack,
            StrategyMetrics::Wholesale(_) => Strategy::Wholesale,
        }
    }
}

/// Compute metrics for one strategy at one price point. Pure dispatch,
/// no validation; the solver calls this in a tight loop.
pub fn metrics_for(strategy: Strategy, price: Money, a: &DealAssumptions) -> StrategyMetrics {
    match strategy {
        Strategy::LongTermRental => StrategyMetrics::Ltr(ltr::metrics(price, a)),
        Strategy::ShortTermRental => StrategyMetrics::Str(str_rental::metrics(price, a)),
        Strategy::Brrrr => StrategyMetrics::Brrrr(brrrr::metrics(price, a)),
        Strategy::FixFlip => StrategyMetrics::Flip(flip::metrics(price, a)),
        Strategy::HouseHack => StrategyMetrics::HouseHack(house_hack::metrics(price, a)),
        Strategy::Wholesale => StrategyMetrics::Wholesale(wholesale::metrics(price, a)),
    }
}

/// Analyze a deal under one strategy at a given purchase price.
pub fn analyze_strategy(
    strategy: Strategy,
    purchase_price: Money,
    assumptions: &DealAssumptions,
) -> DealIqResult<ComputationOutput<StrategyMetrics>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if purchase_price < Decimal::ZERO {
        return Err(DealIqError::InvalidInput {
            field: "purchase_price".to_string(),
            reason: "must be non-negative".to_string(),
        });
    }
    assumptions.validate(&mut warnings)?;

    match strategy {
        Strategy::ShortTermRental if assumptions.average_daily_rate.is_zero() => {
            warnings.push(
                "Average daily rate is zero; short-term income will be zero".to_string(),
            );
        }
        Strategy::Brrrr | Strategy::FixFlip | Strategy::Wholesale
            if assumptions.arv.is_zero() =>
        {
            warnings.push("After-repair value is zero; results will not be meaningful".to_string());
        }
        _ => {}
    }

    let result = metrics_for(strategy, purchase_price, assumptions);

    Ok(with_metadata(
        methodology(strategy),
        assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

fn methodology(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::LongTermRental => {
            "Long-term rental: NOI from vacancy-adjusted rent less operating expenses, \
             financed at the stated down payment and rate"
        }
        Strategy::ShortTermRental => {
            "Short-term rental: occupancy-adjusted nightly income with fixed \
             management, platform, utility and supply costs"
        }
        Strategy::Brrrr => {
            "BRRRR: 30% cash acquisition plus rehab, refinance at 75% of ARV, \
             long-term rental cash flow against the refinance loan"
        }
        Strategy::FixFlip => {
            "Fix & flip: interest-only carry through the holding period, profit at \
             sale net of selling costs, checked against the 70% rule"
        }
        Strategy::HouseHack => {
            "House hack: FHA-style 3.5% down with PMI, rented rooms offsetting the \
             full ownership cost"
        }
        Strategy::Wholesale => {
            "Wholesale: assignment fee as the spread between the end buyer's \
             maximum allowable offer and the contract price"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::CanonicalDefaults;
    use rust_decimal_macros::dec;

    fn sample_assumptions() -> DealAssumptions {
        DealAssumptions::from_listing(&CanonicalDefaults::default(), dec!(300000), dec!(2500))
    }

    #[test]
    fn test_analyze_wraps_envelope() {
        let out = analyze_strategy(Strategy::LongTermRental, dec!(300000), &sample_assumptions())
            .unwrap();
        assert!(matches!(out.result, StrategyMetrics::Ltr(_)));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert!(out.assumptions.is_object());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = analyze_strategy(Strategy::LongTermRental, dec!(-1), &sample_assumptions())
            .unwrap_err();
        assert!(matches!(err, DealIqError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_arv_warns_for_flip() {
        let mut a = sample_assumptions();
        a.arv = Decimal::ZERO;
        let out = analyze_strategy(Strategy::FixFlip, dec!(200000), &a).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("After-repair")));
    }

    #[test]
    fn test_dispatch_covers_all_strategies() {
        let a = sample_assumptions();
        for s in [
            Strategy::LongTermRental,
            Strategy::ShortTermRental,
            Strategy::Brrrr,
            Strategy::FixFlip,
            Strategy::HouseHack,
            Strategy::Wholesale,
        ] {
            let m = metrics_for(s, dec!(300000), &a);
            assert_eq!(m.strategy(), s);
        }
    }
}
