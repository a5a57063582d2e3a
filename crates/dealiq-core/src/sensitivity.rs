//! One-way sensitivity sweeps over the long-term rental metrics.
//!
//! Fixed discrete grids for charting; no interpolation. Each sweep
//! perturbs a single input with everything else held at base.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::error::DealIqError;
use crate::strategies::ltr;
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::DealIqResult;

/// Interest rates below 1% are not realistic scenarios.
const MIN_RATE: Decimal = dec!(0.01);

/// The swept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    InterestRate,
    PurchasePrice,
    MonthlyRent,
    VacancyRate,
}

/// One grid point: the perturbed input and the resulting metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: Decimal,
    pub monthly_cash_flow: Decimal,
    pub cash_on_cash: Rate,
    pub cap_rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweep {
    pub parameter: SweepParameter,
    pub points: Vec<SensitivityPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub sweeps: Vec<Sweep>,
}

/// Run all four sweeps against the listed price.
pub fn run_sensitivity(
    assumptions: &DealAssumptions,
) -> DealIqResult<ComputationOutput<SensitivityReport>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if assumptions.list_price <= Decimal::ZERO {
        return Err(DealIqError::InvalidInput {
            field: "list_price".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    assumptions.validate(&mut warnings)?;

    let report = SensitivityReport {
        sweeps: vec![
            interest_rate_sweep(assumptions),
            price_sweep(assumptions),
            rent_sweep(assumptions),
            vacancy_sweep(assumptions),
        ],
    };

    Ok(with_metadata(
        "One-way sweeps re-evaluating long-term rental metrics over \
         fixed perturbation grids",
        assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        report,
    ))
}

fn point(value: Decimal, price: Decimal, a: &DealAssumptions) -> SensitivityPoint {
    let m = ltr::metrics(price, a);
    SensitivityPoint {
        value,
        monthly_cash_flow: m.monthly_cash_flow,
        cash_on_cash: m.cash_on_cash,
        cap_rate: m.cap_rate,
    }
}

/// Base rate +/- 1.5% in 0.5% steps, clamped to a 1% floor.
fn interest_rate_sweep(a: &DealAssumptions) -> Sweep {
    let mut points = Vec::with_capacity(7);
    let mut offset = dec!(-0.015);
    for _ in 0..7 {
        let rate = (a.interest_rate + offset).max(MIN_RATE);
        let mut perturbed = a.clone();
        perturbed.interest_rate = rate;
        points.push(point(rate, a.list_price, &perturbed));
        offset += dec!(0.005);
    }
    Sweep { parameter: SweepParameter::InterestRate, points }
}

/// Base price +/- 15% in 5% steps.
fn price_sweep(a: &DealAssumptions) -> Sweep {
    let mut points = Vec::with_capacity(7);
    let mut multiplier = dec!(0.85);
    for _ in 0..7 {
        let price = a.list_price * multiplier;
        points.push(point(price, price, a));
        multiplier += dec!(0.05);
    }
    Sweep { parameter: SweepParameter::PurchasePrice, points }
}

/// Base rent +/- 15% in 5% steps.
fn rent_sweep(a: &DealAssumptions) -> Sweep {
    let mut points = Vec::with_capacity(7);
    let mut multiplier = dec!(0.85);
    for _ in 0..7 {
        let rent = a.monthly_rent * multiplier;
        let mut perturbed = a.clone();
        perturbed.monthly_rent = rent;
        points.push(point(rent, a.list_price, &perturbed));
        multiplier += dec!(0.05);
    }
    Sweep { parameter: SweepParameter::MonthlyRent, points }
}

/// Absolute 0% to 15% in 2.5% steps, not centered on base.
fn vacancy_sweep(a: &DealAssumptions) -> Sweep {
    let mut points = Vec::with_capacity(7);
    let mut vacancy = Decimal::ZERO;
    for _ in 0..7 {
        let mut perturbed = a.clone();
        perturbed.vacancy_rate = vacancy;
        points.push(point(vacancy, a.list_price, &perturbed));
        vacancy += dec!(0.025);
    }
    Sweep { parameter: SweepParameter::VacancyRate, points }
}
