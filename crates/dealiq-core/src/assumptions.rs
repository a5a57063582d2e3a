use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DealIqError;
use crate::types::{Money, Rate};
use crate::DealIqResult;

/// Canonical default constants shared across every implementation of the
/// engine (mobile client, backend worksheet endpoints, this crate).
///
/// These are injected as a parameter, never hardcoded at call sites:
/// divergence between implementations silently produces different target
/// prices, so there is exactly one source of truth and it is versioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDefaults {
    /// Schema version for cross-implementation compatibility checks.
    pub schema_version: u32,
    pub vacancy_rate: Rate,
    pub maintenance_pct: Rate,
    pub management_pct: Rate,
    pub down_payment_pct: Rate,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub buy_discount_pct: Rate,
    /// Annual insurance as a fraction of list price.
    pub insurance_pct: Rate,
    /// Annual property taxes as a fraction of list price.
    pub property_tax_pct: Rate,
    pub renovation_budget_pct: Rate,
    pub holding_costs_pct: Rate,
    pub refinance_closing_costs_pct: Rate,
    pub closing_cost_pct: Rate,
    pub selling_cost_pct: Rate,
}

impl Default for CanonicalDefaults {
    fn default() -> Self {
        CanonicalDefaults {
            schema_version: 1,
            vacancy_rate: dec!(0.05),
            maintenance_pct: dec!(0.05),
            management_pct: dec!(0.08),
            down_payment_pct: dec!(0.20),
            interest_rate: dec!(0.07),
            loan_term_years: 30,
            buy_discount_pct: dec!(0.10),
            insurance_pct: dec!(0.005),
            property_tax_pct: dec!(0.012),
            renovation_budget_pct: dec!(0.10),
            holding_costs_pct: dec!(0.01),
            refinance_closing_costs_pct: dec!(0.02),
            closing_cost_pct: dec!(0.03),
            selling_cost_pct: dec!(0.06),
        }
    }
}

/// Immutable assumption bundle driving every strategy model.
///
/// All rate fields are decimals (0.08 = 8%), never percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAssumptions {
    /// Asking price of the listing.
    pub list_price: Money,
    /// Down payment as a fraction of purchase price. Must be in [0, 1).
    pub down_payment_pct: Rate,
    /// Annual mortgage interest rate.
    pub interest_rate: Rate,
    /// Loan term in years. Must be > 0.
    pub loan_term_years: u32,
    /// Monthly long-term rent.
    pub monthly_rent: Money,
    /// Average daily rate for short-term rental.
    pub average_daily_rate: Money,
    /// Short-term rental occupancy fraction.
    pub occupancy_rate: Rate,
    pub vacancy_rate: Rate,
    /// Annual property taxes.
    pub property_taxes: Money,
    /// Annual insurance premium.
    pub insurance: Money,
    pub management_pct: Rate,
    pub maintenance_pct: Rate,
    pub closing_cost_pct: Rate,
    /// Renovation budget.
    pub rehab_cost: Money,
    /// After-repair value.
    pub arv: Money,
    /// Flip holding period in months.
    pub holding_period_months: u32,
    /// Selling costs at exit as a fraction of ARV.
    pub selling_cost_pct: Rate,
    /// Bedroom count for house-hack room splits.
    pub total_bedrooms: u32,
    /// Rooms rented out while owner-occupying.
    pub rooms_rented: u32,
    /// Wholesale assignment fee as a fraction of list price.
    pub wholesale_fee_pct: Rate,
}

impl DealAssumptions {
    /// Build a bundle for a listing using the canonical defaults for every
    /// field the caller has no data for.
    pub fn from_listing(
        defaults: &CanonicalDefaults,
        list_price: Money,
        monthly_rent: Money,
    ) -> Self {
        DealAssumptions {
            list_price,
            down_payment_pct: defaults.down_payment_pct,
            interest_rate: defaults.interest_rate,
            loan_term_years: defaults.loan_term_years,
            monthly_rent,
            // Rule-of-thumb seed: nightly rate ~ 1/10 of monthly rent at 65% occupancy.
            average_daily_rate: monthly_rent / dec!(10),
            occupancy_rate: dec!(0.65),
            vacancy_rate: defaults.vacancy_rate,
            property_taxes: list_price * defaults.property_tax_pct,
            insurance: list_price * defaults.insurance_pct,
            management_pct: defaults.management_pct,
            maintenance_pct: defaults.maintenance_pct,
            closing_cost_pct: defaults.closing_cost_pct,
            rehab_cost: list_price * defaults.renovation_budget_pct,
            arv: list_price,
            holding_period_months: 6,
            selling_cost_pct: defaults.selling_cost_pct,
            total_bedrooms: 3,
            rooms_rented: 2,
            wholesale_fee_pct: dec!(0.05),
        }
    }

    /// Discounted offer price implied by the canonical buy-discount.
    pub fn suggested_offer_price(&self, defaults: &CanonicalDefaults) -> Money {
        self.list_price * (Decimal::ONE - defaults.buy_discount_pct)
    }

    /// Validate the hard invariants of the bundle and collect soft warnings
    /// for unusual-but-legal inputs.
    ///
    /// The metric functions themselves never validate (they must stay
    /// infallible for the solver); this runs once at the API boundary.
    pub fn validate(&self, warnings: &mut Vec<String>) -> DealIqResult<()> {
        if self.down_payment_pct < Decimal::ZERO || self.down_payment_pct >= Decimal::ONE {
            return Err(DealIqError::InvalidInput {
                field: "down_payment_pct".into(),
                reason: "Down payment fraction must be in [0, 1)".into(),
            });
        }

        if self.interest_rate < Decimal::ZERO {
            return Err(DealIqError::InvalidInput {
                field: "interest_rate".into(),
                reason: "Interest rate must be non-negative".into(),
            });
        }

        if self.loan_term_years == 0 {
            return Err(DealIqError::InvalidInput {
                field: "loan_term_years".into(),
                reason: "Loan term must be at least 1 year".into(),
            });
        }

        if self.vacancy_rate < Decimal::ZERO || self.vacancy_rate >= Decimal::ONE {
            return Err(DealIqError::InvalidInput {
                field: "vacancy_rate".into(),
                reason: "Vacancy rate must be in [0, 1)".into(),
            });
        }

        if self.occupancy_rate < Decimal::ZERO || self.occupancy_rate > Decimal::ONE {
            return Err(DealIqError::InvalidInput {
                field: "occupancy_rate".into(),
                reason: "Occupancy rate must be in [0, 1]".into(),
            });
        }

        if self.vacancy_rate > dec!(0.15) {
            warnings.push(format!(
                "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
                self.vacancy_rate * dec!(100)
            ));
        }

        if self.interest_rate > dec!(0.12) {
            warnings.push(format!(
                "Interest rate {:.1}% exceeds 12% — verify financing terms",
                self.interest_rate * dec!(100)
            ));
        }

        if self.rehab_cost > Decimal::ZERO && self.arv < self.list_price {
            warnings.push(
                "ARV below list price despite a rehab budget — check the ARV estimate".into(),
            );
        }

        if self.rooms_rented > self.total_bedrooms {
            warnings.push(
                "More rooms rented than bedrooms — house-hack income will be overstated".into(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_listing_uses_canonical_defaults() {
        let defaults = CanonicalDefaults::default();
        let a = DealAssumptions::from_listing(&defaults, dec!(300000), dec!(2500));

        assert_eq!(a.down_payment_pct, dec!(0.20));
        assert_eq!(a.property_taxes, dec!(3600.0));
        assert_eq!(a.insurance, dec!(1500.0));
        assert_eq!(a.rehab_cost, dec!(30000.0));
        assert_eq!(a.arv, dec!(300000));
    }

    #[test]
    fn test_validate_rejects_full_financing() {
        let defaults = CanonicalDefaults::default();
        let mut a = DealAssumptions::from_listing(&defaults, dec!(300000), dec!(2500));
        a.down_payment_pct = dec!(1.0);

        let mut warnings = Vec::new();
        assert!(a.validate(&mut warnings).is_err());
    }

    #[test]
    fn test_validate_warns_on_high_vacancy() {
        let defaults = CanonicalDefaults::default();
        let mut a = DealAssumptions::from_listing(&defaults, dec!(300000), dec!(2500));
        a.vacancy_rate = dec!(0.20);

        let mut warnings = Vec::new();
        a.validate(&mut warnings).unwrap();
        assert!(warnings.iter().any(|w| w.contains("15%")));
    }

    #[test]
    fn test_suggested_offer_applies_buy_discount() {
        let defaults = CanonicalDefaults::default();
        let a = DealAssumptions::from_listing(&defaults, dec!(300000), dec!(2500));
        assert_eq!(a.suggested_offer_price(&defaults), dec!(270000.00));
    }

    #[test]
    fn test_defaults_serialize_stable() {
        // The canonical record is the cross-implementation contract; its JSON
        // field names must not drift.
        let json = serde_json::to_value(CanonicalDefaults::default()).unwrap();
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["vacancy_rate"], "0.05");
        assert_eq!(json["loan_term_years"], 30);
    }
}
