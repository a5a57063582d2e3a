use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::types::{Money, Rate};

/// The 70% rule: maximum purchase price is 70% of ARV less rehab.
const SEVENTY_PCT_RULE: Decimal = dec!(0.70);

/// Fix-and-flip metrics at a single price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipMetrics {
    pub purchase_price: Money,
    pub rehab_cost: Money,
    pub arv: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub closing_costs: Money,
    /// Interest-only carry plus prorated taxes and insurance over the
    /// holding period.
    pub holding_costs: Money,
    pub selling_costs: Money,
    /// Price plus purchase costs, rehab and carry.
    pub total_investment: Money,
    pub net_profit: Money,
    pub roi: Rate,
    /// Annualized return assuming one project per holding period.
    pub annualized_roi: Rate,
    /// Maximum purchase under the 70% rule.
    pub max_offer_70_rule: Money,
    pub passes_70_rule: bool,
}

/// Flip model: financed acquisition carried interest-only through the
/// holding period, profit taken at sale after selling costs.
pub fn metrics(purchase_price: Money, a: &DealAssumptions) -> FlipMetrics {
    let down_payment = purchase_price * a.down_payment_pct;
    let loan_amount = purchase_price - down_payment;
    let closing_costs = purchase_price * a.closing_cost_pct;

    let months = Decimal::from(a.holding_period_months);
    let monthly_interest = loan_amount * a.interest_rate / dec!(12);
    let monthly_taxes_insurance = (a.property_taxes + a.insurance) / dec!(12);
    let holding_costs = (monthly_interest + monthly_taxes_insurance) * months;

    let selling_costs = a.arv * a.selling_cost_pct;

    let total_investment = purchase_price + closing_costs + a.rehab_cost + holding_costs;
    let net_profit = a.arv - total_investment - selling_costs;

    let roi = if total_investment.is_zero() {
        Decimal::ZERO
    } else {
        net_profit / total_investment
    };
    let annualized_roi = if months.is_zero() {
        Decimal::ZERO
    } else {
        roi * dec!(12) / months
    };

    let max_offer_70_rule = a.arv * SEVENTY_PCT_RULE - a.rehab_cost;
    let passes_70_rule = purchase_price <= max_offer_70_rule;

    FlipMetrics {
        purchase_price,
        rehab_cost: a.rehab_cost,
        arv: a.arv,
        down_payment,
        loan_amount,
        closing_costs,
        holding_costs,
        selling_costs,
        total_investment,
        net_profit,
        roi,
        annualized_roi,
        max_offer_70_rule,
        passes_70_rule,
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
            dec!(1800),
        );
        a.rehab_cost = dec!(50000);
        a.arv = dec!(330000);
        a.interest_rate = dec!(0.07);
        a.holding_period_months = 6;
        a.property_taxes = dec!(2400);
        a.insurance = dec!(1200);
        a.selling_cost_pct = dec!(0.06);
        a.closing_cost_pct = dec!(0.03);
        a.down_payment_pct = dec!(0.20);
        a
    }

    #[test]
    fn test_profit_breakdown() {
        let m = metrics(dec!(200000), &sample_assumptions());
        // Loan 160k at 7% interest-only plus $300/mo taxes+insurance,
        // 6 months: (933.33 + 300) * 6 = 7,400.
        assert!((m.holding_costs - dec!(7400)).abs() < dec!(0.01));
        assert_eq!(m.selling_costs, dec!(19800.00));
        assert_eq!(m.closing_costs, dec!(6000.00));
        // 330k - (200k + 6k + 50k + 7.4k) - 19.8k = 46.8k
        assert!((m.net_profit - dec!(46800)).abs() < dec!(0.01));
        assert!((m.roi - m.net_profit / m.total_investment).abs() < dec!(0.000001));
    }

    #[test]
    fn test_seventy_pct_rule() {
        let a = sample_assumptions();
        // 330k * 0.70 - 50k = 181k ceiling.
        let m = metrics(dec!(181000), &a);
        assert_eq!(m.max_offer_70_rule, dec!(181000.00));
        assert!(m.passes_70_rule);
        let m = metrics(dec!(181001), &a);
        assert!(!m.passes_70_rule);
    }

    #[test]
    fn test_profit_decreases_with_price() {
        let a = sample_assumptions();
        let lo = metrics(dec!(150000), &a).net_profit;
        let hi = metrics(dec!(250000), &a).net_profit;
        assert!(lo > hi);
    }

    #[test]
    fn test_zero_holding_period() {
        let mut a = sample_assumptions();
        a.holding_period_months = 0;
        let m = metrics(dec!(200000), &a);
        assert_eq!(m.holding_costs, Decimal::ZERO);
        assert_eq!(m.annualized_roi, Decimal::ZERO);
    }
}
