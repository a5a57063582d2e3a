use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::mortgage::monthly_payment;
use crate::types::{Money, Rate};

/// Long-term rental metrics at a single price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtrMetrics {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub closing_costs: Money,
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub annual_debt_service: Money,
    pub effective_gross_income: Money,
    pub operating_expenses: Money,
    pub noi: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub cap_rate: Rate,
    pub cash_on_cash: Rate,
    pub dscr: Decimal,
}

/// Long-term rental model. Pure and infallible: a non-positive price
/// produces mathematically consistent degenerate output, never a panic,
/// because the solver bisects through it unguarded.
pub fn metrics(purchase_price: Money, a: &DealAssumptions) -> LtrMetrics {
    let down_payment = purchase_price * a.down_payment_pct;
    let closing_costs = purchase_price * a.closing_cost_pct;
    let loan_amount = purchase_price - down_payment;

    let payment = monthly_payment(loan_amount, a.interest_rate, a.loan_term_years);
    let annual_debt_service = payment * dec!(12);

    let annual_rent = a.monthly_rent * dec!(12);
    let effective_gross_income = annual_rent * (Decimal::ONE - a.vacancy_rate);
    let operating_expenses = a.property_taxes
        + a.insurance
        + annual_rent * (a.management_pct + a.maintenance_pct);
    let noi = effective_gross_income - operating_expenses;

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

    LtrMetrics {
        purchase_price,
        down_payment,
        closing_costs,
        loan_amount,
        monthly_payment: payment,
        annual_debt_service,
        effective_gross_income,
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
        a.interest_rate = dec!(0.06);
        a.property_taxes = dec!(3600);
        a.insurance = dec!(1500);
        a.management_pct = Decimal::ZERO;
        a.maintenance_pct = dec!(0.05);
        a
    }

    #[test]
    fn test_reference_scenario() {
        // $300k, $2,500/mo rent, 20% down at 6%/30yr, 5% vacancy, 5% maint:
        // loan $240k, P&I $1,438.92, NOI $21,900, cash flow
        // 21900/12 - 1438.92 = $386.08/mo.
        let m = metrics(dec!(300000), &sample_assumptions());

        assert_eq!(m.loan_amount, dec!(240000));
        assert!((m.monthly_payment - dec!(1438.92)).abs() < dec!(0.01));
        assert_eq!(m.noi, dec!(21900.00));
        assert!(
            (m.monthly_cash_flow - dec!(386.08)).abs() < dec!(0.01),
            "monthly cash flow {}",
            m.monthly_cash_flow
        );
        assert!((m.cap_rate - dec!(0.073)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_dscr_against_hand_calc() {
        let m = metrics(dec!(300000), &sample_assumptions());
        let expected = m.noi / m.annual_debt_service;
        assert_eq!(m.dscr, expected);
        assert!(m.dscr > dec!(1.2));
    }

    #[test]
    fn test_cash_flow_non_increasing_in_price() {
        let a = sample_assumptions();
        let mut prev = metrics(dec!(100000), &a).monthly_cash_flow;
        for price in [150000, 200000, 250000, 300000, 400000, 600000] {
            let cf = metrics(Decimal::from(price), &a).monthly_cash_flow;
            assert!(cf <= prev, "cash flow rose from {prev} to {cf} at {price}");
            prev = cf;
        }
    }

    #[test]
    fn test_zero_price_degenerate() {
        let m = metrics(Decimal::ZERO, &sample_assumptions());
        assert_eq!(m.cap_rate, Decimal::ZERO);
        assert_eq!(m.cash_on_cash, Decimal::ZERO);
        // No debt service means all NOI is cash flow.
        assert_eq!(m.annual_cash_flow, m.noi);
    }

    #[test]
    fn test_idempotent() {
        let a = sample_assumptions();
        assert_eq!(metrics(dec!(275000), &a), metrics(dec!(275000), &a));
    }
}
