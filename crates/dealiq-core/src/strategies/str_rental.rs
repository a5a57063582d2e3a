use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::mortgage::monthly_payment;
use crate::types::{Money, Rate};

/// Short-term management runs ~20% of gross regardless of the long-term
/// management assumption, plus a 3% booking-platform fee.
const STR_MANAGEMENT_PCT: Decimal = dec!(0.20);
const STR_PLATFORM_FEE_PCT: Decimal = dec!(0.03);
/// Flat annual operating constants for a furnished short-term unit.
const STR_ANNUAL_UTILITIES: Decimal = dec!(3600);
const STR_ANNUAL_SUPPLIES: Decimal = dec!(2400);

/// Short-term rental metrics at a single price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrMetrics {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub closing_costs: Money,
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub annual_debt_service: Money,
    pub gross_income: Money,
    pub operating_expenses: Money,
    pub noi: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub cap_rate: Rate,
    pub cash_on_cash: Rate,
    pub dscr: Decimal,
}

/// Short-term rental model: occupancy-adjusted nightly income, fixed
/// management/platform/utility/supply expense structure, otherwise the
/// same NOI and financing derivation as the long-term model.
pub fn metrics(purchase_price: Money, a: &DealAssumptions) -> StrMetrics {
    let down_payment = purchase_price * a.down_payment_pct;
    let closing_costs = purchase_price * a.closing_cost_pct;
    let loan_amount = purchase_price - down_payment;

    let payment = monthly_payment(loan_amount, a.interest_rate, a.loan_term_years);
    let annual_debt_service = payment * dec!(12);

    let gross_income = a.average_daily_rate * dec!(365) * a.occupancy_rate;
    let operating_expenses = gross_income
        * (STR_MANAGEMENT_PCT + STR_PLATFORM_FEE_PCT + a.maintenance_pct)
        + STR_ANNUAL_UTILITIES
        + STR_ANNUAL_SUPPLIES
        + a.property_taxes
        + a.insurance;
    let noi = gross_income - operating_expenses;

    let annual_cash_flow = noi - annual_debt_service;
    let monthly_cash_flow = annual_cash_flow / dec!(12);

    let cap_rate = if purchase_price.is_zero() {
        Decimal::ZERO
    } else {
        noi / purchase_price
    };

    let cash_invested = down_payment + closing_costs;
    let cash_on_cash = if cash_invested.is_zero() {
        Decimal::ZERO
    } else {
        annual_cash_flow / cash_invested
    };

    let dscr = if annual_debt_service.is_zero() {
        Decimal::ZERO
    } else {
        noi / annual_debt_service
    };

    StrMetrics {
        purchase_price,
        down_payment,
        closing_costs,
        loan_amount,
        monthly_payment: payment,
        annual_debt_service,
        gross_income,
        operating_expenses,
        noi,
        monthly_cash_flow,
        annual_cash_flow,
        cap_rate,
        cash_on_cash,
        dscr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::CanonicalDefaults;

    fn sample_assumptions() -> DealAssumptions {
        let mut a = DealAssumptions::from_listing(
            &CanonicalDefaults::default(),
            dec!(300000),
            dec!(2500),
        );
        a.average_daily_rate = dec!(180);
        a.occupancy_rate = dec!(0.65);
        a.interest_rate = dec!(0.06);
        a.property_taxes = dec!(3600);
        a.insurance = dec!(1500);
        a.maintenance_pct = dec!(0.05);
        a
    }

    #[test]
    fn test_gross_income_from_nightly_rate() {
        let m = metrics(dec!(300000), &sample_assumptions());
        // 180 * 365 * 0.65 = 42,705
        assert_eq!(m.gross_income, dec!(42705.00));
    }

    #[test]
    fn test_expense_structure() {
        let m = metrics(dec!(300000), &sample_assumptions());
        // 28% of gross + 3600 + 2400 + 3600 + 1500
        let expected = dec!(42705.00) * dec!(0.28) + dec!(11100);
        assert_eq!(m.operating_expenses, expected);
    }

    #[test]
    fn test_cash_flow_non_increasing_in_price() {
        let a = sample_assumptions();
        let mut prev = metrics(dec!(100000), &a).monthly_cash_flow;
        for price in [200000, 300000, 450000, 700000] {
            let cf = metrics(Decimal::from(price), &a).monthly_cash_flow;
            assert!(cf <= prev);
            prev = cf;
        }
    }

    #[test]
    fn test_zero_occupancy_negative_noi() {
        let mut a = sample_assumptions();
        a.occupancy_rate = Decimal::ZERO;
        let m = metrics(dec!(300000), &a);
        // No income, only fixed expenses.
        assert_eq!(m.gross_income, Decimal::ZERO);
        assert!(m.noi < Decimal::ZERO);
    }
}
