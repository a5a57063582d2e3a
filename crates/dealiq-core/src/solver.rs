//! Target-price and breakeven solver.
//!
//! Bounded bisection over the purchase price. Each strategy declares a
//! primary metric, the direction that metric moves as price rises, an
//! acceptance band for "good deal" pricing and a breakeven threshold.
//! Iteration caps are fixed; convergence is sub-dollar over realistic
//! price ranges so no tolerance parameter is exposed.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::error::DealIqError;
use crate::strategies::{self, StrategyMetrics};
use crate::types::{
    round_to_thousand, with_metadata, ComputationOutput, Money, Rate, Strategy,
};
use crate::DealIqResult;

const TARGET_ITERATIONS: u32 = 20;
const BREAKEVEN_ITERATIONS: u32 = 30;

/// Wholesale targets are not solved: contract at MAO less a fixed
/// margin, never below half of list.
const WHOLESALE_MARGIN: Decimal = dec!(12000);
const WHOLESALE_FLOOR_PCT: Decimal = dec!(0.50);

/// How the primary metric moves as purchase price increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Higher price, lower metric (cash flow, profit, recovery).
    Decreasing,
    /// Higher price, higher metric (effective housing cost).
    Increasing,
}

/// Acceptance band for the target search, in metric units.
#[derive(Debug, Clone, Copy)]
struct Band {
    lo: Decimal,
    hi: Decimal,
}

impl Band {
    fn contains(&self, v: Decimal) -> bool {
        v >= self.lo && v <= self.hi
    }
}

/// Solver output for one strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetResult {
    pub strategy: Strategy,
    /// Price at which the strategy hits its target band, nearest $1,000.
    pub target_price: Money,
    pub discount_amount: Money,
    pub discount_percent: Rate,
    /// Price at which the strategy's metric crosses its breakeven
    /// threshold, nearest $1,000.
    pub breakeven_price: Money,
    pub breakeven_percent_of_list: Rate,
    /// Metrics evaluated at the (unrounded) target price.
    pub metrics_at_target: StrategyMetrics,
}

/// Solve for the target and breakeven price of a strategy against the
/// listed price in the assumptions.
pub fn target_price(
    strategy: Strategy,
    assumptions: &DealAssumptions,
) -> DealIqResult<ComputationOutput<TargetResult>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if assumptions.list_price <= Decimal::ZERO {
        return Err(DealIqError::InvalidInput {
            field: "list_price".to_string(),
            reason: "must be positive to anchor the search interval".to_string(),
        });
    }
    assumptions.validate(&mut warnings)?;

    let list = assumptions.list_price;
    let lo = (list * dec!(0.1)).max(dec!(1000));
    let hi = list * dec!(2);

    let (raw_target, raw_breakeven) = match strategy {
        Strategy::Wholesale => wholesale_prices(assumptions),
        _ => {
            let solve = StrategySolve::for_strategy(strategy, assumptions);
            let f =
                |price: Money| solve.eval(strategies::metrics_for(strategy, price, assumptions));
            let target = bisect_to_band(&f, solve.direction, solve.band, lo, hi, TARGET_ITERATIONS);
            let breakeven = bisect_to_threshold(
                &f,
                solve.direction,
                solve.breakeven,
                lo,
                hi,
                BREAKEVEN_ITERATIONS,
            );
            (target, breakeven)
        }
    };

    let discount_amount = list - raw_target;
    let discount_percent = discount_amount / list * dec!(100);

    let result = TargetResult {
        strategy,
        target_price: round_to_thousand(raw_target),
        discount_amount,
        discount_percent,
        breakeven_price: round_to_thousand(raw_breakeven),
        breakeven_percent_of_list: raw_breakeven / list * dec!(100),
        metrics_at_target: strategies::metrics_for(strategy, raw_target, assumptions),
    };

    Ok(with_metadata(
        "Bounded bisection over purchase price against the strategy's \
         acceptance band and breakeven threshold",
        assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

/// Per-strategy solve parameters.
struct StrategySolve {
    direction: Direction,
    band: Band,
    breakeven: Decimal,
    metric: fn(StrategyMetrics) -> Decimal,
}

impl StrategySolve {
    fn for_strategy(strategy: Strategy, a: &DealAssumptions) -> Self {
        match strategy {
            Strategy::LongTermRental => StrategySolve {
                direction: Direction::Decreasing,
                band: Band { lo: dec!(200), hi: dec!(600) },
                breakeven: Decimal::ZERO,
                metric: |m| match m {
                    StrategyMetrics::Ltr(m) => m.monthly_cash_flow,
                    _ => Decimal::ZERO,
                },
            },
            Strategy::ShortTermRental => StrategySolve {
                direction: Direction::Decreasing,
                band: Band { lo: dec!(500), hi: dec!(1500) },
                breakeven: Decimal::ZERO,
                metric: |m| match m {
                    StrategyMetrics::Str(m) => m.monthly_cash_flow,
                    _ => Decimal::ZERO,
                },
            },
            Strategy::Brrrr => StrategySolve {
                direction: Direction::Decreasing,
                band: Band { lo: dec!(95), hi: dec!(105) },
                breakeven: dec!(80),
                metric: |m| match m {
                    StrategyMetrics::Brrrr(m) => m.capital_recovery_pct,
                    _ => Decimal::ZERO,
                },
            },
            Strategy::FixFlip => StrategySolve {
                direction: Direction::Decreasing,
                band: Band { lo: dec!(30000), hi: dec!(80000) },
                breakeven: Decimal::ZERO,
                metric: |m| match m {
                    StrategyMetrics::Flip(m) => m.net_profit,
                    _ => Decimal::ZERO,
                },
            },
            Strategy::HouseHack => StrategySolve {
                direction: Direction::Increasing,
                band: Band { lo: dec!(-200), hi: dec!(200) },
                // Paying more than an equivalent market rental defeats
                // the point of hacking.
                breakeven: house_hack_market_rent(a),
                metric: |m| match m {
                    StrategyMetrics::HouseHack(m) => m.net_monthly_housing_cost,
                    _ => Decimal::ZERO,
                },
            },
            // Handled directly in target_price.
            Strategy::Wholesale => StrategySolve {
                direction: Direction::Decreasing,
                band: Band { lo: Decimal::ZERO, hi: Decimal::ZERO },
                breakeven: Decimal::ZERO,
                metric: |_| Decimal::ZERO,
            },
        }
    }

    fn eval(&self, m: StrategyMetrics) -> Decimal {
        (self.metric)(m)
    }
}

fn house_hack_market_rent(a: &DealAssumptions) -> Decimal {
    if a.total_bedrooms == 0 {
        Decimal::ZERO
    } else {
        a.monthly_rent / Decimal::from(a.total_bedrooms) * dec!(1.2)
    }
}

/// Wholesale target is computed directly from the MAO, not solved.
/// Breakeven is the MAO itself: the assignment fee crosses zero there.
fn wholesale_prices(a: &DealAssumptions) -> (Money, Money) {
    let m = strategies::wholesale::metrics(Decimal::ZERO, a);
    let target = (m.max_allowable_offer - WHOLESALE_MARGIN).max(a.list_price * WHOLESALE_FLOOR_PCT);
    (target, m.max_allowable_offer)
}

/// True when the metric at this price is on the acceptable side of the
/// threshold.
fn is_good(value: Decimal, threshold: Decimal, direction: Direction) -> bool {
    match direction {
        Direction::Decreasing => value >= threshold,
        Direction::Increasing => value <= threshold,
    }
}

/// Bisect toward a price whose metric lands inside the band.
///
/// The sign condition is checked once at the endpoints. If both
/// endpoints are good the lower bound is returned; if both fail, the
/// upper bound. Monotonicity is assumed, not verified.
fn bisect_to_band(
    f: &dyn Fn(Money) -> Decimal,
    direction: Direction,
    band: Band,
    lo: Money,
    hi: Money,
    max_iterations: u32,
) -> Money {
    // Aim the search at the band floor on the good side, which is the
    // highest price still inside the band.
    let threshold = match direction {
        Direction::Decreasing => band.lo,
        Direction::Increasing => band.hi,
    };

    let good_lo = is_good(f(lo), threshold, direction);
    let good_hi = is_good(f(hi), threshold, direction);
    if good_lo && good_hi {
        return lo;
    }
    if !good_lo && !good_hi {
        return hi;
    }

    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..max_iterations {
        let mid = (lo + hi) / dec!(2);
        let value = f(mid);
        if band.contains(value) {
            return mid;
        }
        // In both directions the good side of the bracket is the lower
        // price; only the good predicate differs.
        if is_good(value, threshold, direction) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / dec!(2)
}

/// Bisect toward the price whose metric equals the threshold.
fn bisect_to_threshold(
    f: &dyn Fn(Money) -> Decimal,
    direction: Direction,
    threshold: Decimal,
    lo: Money,
    hi: Money,
    max_iterations: u32,
) -> Money {
    let good_lo = is_good(f(lo), threshold, direction);
    let good_hi = is_good(f(hi), threshold, direction);
    if good_lo && good_hi {
        return lo;
    }
    if !good_lo && !good_hi {
        return hi;
    }

    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..max_iterations {
        let mid = (lo + hi) / dec!(2);
        if is_good(f(mid), threshold, direction) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / dec!(2)
}
