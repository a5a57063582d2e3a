use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::mortgage::monthly_payment;
use crate::types::{CashOnCash, Money, Rate};

/// Acquisition is modelled as hard-money style: 30% cash in, 70% financed.
const INITIAL_CASH_PCT: Decimal = dec!(0.30);
const INITIAL_LOAN_PCT: Decimal = dec!(0.70);
/// Refinance loan-to-value against the after-repair value.
const REFI_LTV: Decimal = dec!(0.75);

/// Buy-rehab-rent-refinance metrics at a single price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrrrrMetrics {
    pub purchase_price: Money,
    pub rehab_cost: Money,
    pub arv: Money,
    pub initial_cash_invested: Money,
    pub refinance_loan: Money,
    pub cash_back_at_refi: Money,
    pub cash_left_in_deal: Money,
    /// Percentage of the initial cash recovered at refinance, 0-100+.
    pub capital_recovery_pct: Decimal,
    pub equity_created: Money,
    pub monthly_payment: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub cash_on_cash: CashOnCash,
}

/// BRRRR model: cash-heavy acquisition plus rehab, then a refinance at
/// 75% of ARV pays off the original note and returns capital. Post-refi
/// cash flow is the long-term rental income against the new loan.
pub fn metrics(purchase_price: Money, a: &DealAssumptions) -> BrrrrMetrics {
    let closing_costs = purchase_price * a.closing_cost_pct;
    let initial_cash_invested = purchase_price * INITIAL_CASH_PCT + a.rehab_cost + closing_costs;
    let original_loan = purchase_price * INITIAL_LOAN_PCT;

    let refinance_loan = a.arv * REFI_LTV;
    let cash_back_at_refi = refinance_loan - original_loan;
    let recovered = cash_back_at_refi.max(Decimal::ZERO);
    let cash_left_in_deal = (initial_cash_invested - recovered).max(Decimal::ZERO);

    let capital_recovery_pct = if initial_cash_invested <= Decimal::ZERO {
        dec!(100)
    } else {
        (initial_cash_invested - cash_left_in_deal) / initial_cash_invested * dec!(100)
    };

    let equity_created = a.arv - refinance_loan;

    let payment = monthly_payment(refinance_loan, a.interest_rate, a.loan_term_years);
    let annual_debt_service = payment * dec!(12);

    let effective_gross_income = a.monthly_rent * dec!(12) * (Decimal::ONE - a.vacancy_rate);
    let operating_expenses = a.property_taxes
        + a.insurance
        + a.monthly_rent * dec!(12) * (a.management_pct + a.maintenance_pct);
    let noi = effective_gross_income - operating_expenses;

    let annual_cash_flow = noi - annual_debt_service;
    let monthly_cash_flow = annual_cash_flow / dec!(12);

    let cash_on_cash = if cash_left_in_deal.is_zero() {
        CashOnCash::Infinite
    } else {
        CashOnCash::Finite(annual_cash_flow / cash_left_in_deal)
    };

    BrrrrMetrics {
        purchase_price,
        rehab_cost: a.rehab_cost,
        arv: a.arv,
        initial_cash_invested,
        refinance_loan,
        cash_back_at_refi,
        cash_left_in_deal,
        capital_recovery_pct,
        equity_created,
        monthly_payment: payment,
        monthly_cash_flow,
        annual_cash_flow,
        cash_on_cash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::CanonicalDefaults;

    fn sample_assumptions() -> DealAssumptions {
        let mut a = DealAssumptions::from_listing(
            &CanonicalDefaults::default(),
            dec!(200000),
            dec!(2200),
        );
        a.rehab_cost = dec!(40000);
        a.arv = dec!(320000);
        a.interest_rate = dec!(0.07);
        a.property_taxes = dec!(2400);
        a.insurance = dec!(1200);
        a
    }

    #[test]
    fn test_full_capital_recovery_is_infinite_return() {
        let a = sample_assumptions();
        let m = metrics(dec!(200000), &a);
        // Refi loan 320k * 0.75 = 240k; original loan 140k; cash back 100k.
        // Initial cash 60k + 40k + 6k = 106k, so 100k comes back.
        assert_eq!(m.refinance_loan, dec!(240000.00));
        assert_eq!(m.cash_back_at_refi, dec!(100000.00));
        assert_eq!(m.cash_left_in_deal, dec!(6000.0000));
        assert!(!m.cash_on_cash.is_infinite());

        let mut a = a;
        a.arv = dec!(340000);
        let m = metrics(dec!(200000), &a);
        // Refi loan 255k, cash back 115k covers the full 106k initial.
        assert_eq!(m.cash_left_in_deal, Decimal::ZERO);
        assert_eq!(m.cash_on_cash, CashOnCash::Infinite);
        assert_eq!(m.capital_recovery_pct, dec!(100));
    }

    #[test]
    fn test_negative_cash_back_recovers_nothing() {
        let mut a = sample_assumptions();
        a.arv = dec!(150000);
        let m = metrics(dec!(200000), &a);
        // Refi loan 112.5k < original 140k: nothing comes back.
        assert!(m.cash_back_at_refi < Decimal::ZERO);
        assert_eq!(m.cash_left_in_deal, m.initial_cash_invested);
        assert_eq!(m.capital_recovery_pct, Decimal::ZERO);
    }

    #[test]
    fn test_equity_created() {
        let m = metrics(dec!(200000), &sample_assumptions());
        assert_eq!(m.equity_created, dec!(80000.00));
    }

    #[test]
    fn test_zero_initial_cash_degenerate() {
        let mut a = sample_assumptions();
        a.rehab_cost = Decimal::ZERO;
        let m = metrics(Decimal::ZERO, &a);
        assert_eq!(m.capital_recovery_pct, dec!(100));
    }
}
