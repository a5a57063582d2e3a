use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::mortgage::monthly_payment;
use crate::types::Money;

/// Owner-occupied FHA-style financing.
const FHA_DOWN_PCT: Decimal = dec!(0.035);
/// Annual mortgage insurance premium on the loan balance.
const PMI_ANNUAL_PCT: Decimal = dec!(0.0085);
/// A whole-unit rental commands a premium over the per-room rate.
const MARKET_RENT_PREMIUM: Decimal = dec!(1.2);

/// House-hack metrics: live in one room, rent out the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseHackMetrics {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub monthly_pmi: Money,
    pub rent_per_room: Money,
    pub rooms_rented: u32,
    pub monthly_rental_income: Money,
    /// Vacancy and maintenance reserve on the rented rooms.
    pub monthly_reserves: Money,
    /// Out-of-pocket housing cost after rental income. Negative means
    /// the tenants pay the owner to live there.
    pub net_monthly_housing_cost: Money,
    /// Comparable rent for an equivalent unit on the open market.
    pub market_rent_equivalent: Money,
    pub monthly_savings_vs_renting: Money,
}

/// House-hack model: FHA low-down financing with PMI, income from the
/// rented rooms offsetting the full ownership cost.
pub fn metrics(purchase_price: Money, a: &DealAssumptions) -> HouseHackMetrics {
    let down_payment = purchase_price * FHA_DOWN_PCT;
    let loan_amount = purchase_price - down_payment;

    let payment = monthly_payment(loan_amount, a.interest_rate, a.loan_term_years);
    let monthly_pmi = loan_amount * PMI_ANNUAL_PCT / dec!(12);

    let rent_per_room = if a.total_bedrooms == 0 {
        Decimal::ZERO
    } else {
        a.monthly_rent / Decimal::from(a.total_bedrooms)
    };
    // Income is taken at face value; `validate` warns when more rooms are
    // rented than the property has bedrooms.
    let rooms_rented = a.rooms_rented;
    let monthly_rental_income = rent_per_room * Decimal::from(rooms_rented);

    let monthly_reserves = monthly_rental_income * (a.vacancy_rate + a.maintenance_pct);

    let monthly_taxes = a.property_taxes / dec!(12);
    let monthly_insurance = a.insurance / dec!(12);

    let net_monthly_housing_cost = payment + monthly_pmi + monthly_taxes + monthly_insurance
        + monthly_reserves
        - monthly_rental_income;

    let market_rent_equivalent = rent_per_room * MARKET_RENT_PREMIUM;
    let monthly_savings_vs_renting = market_rent_equivalent - net_monthly_housing_cost;

    HouseHackMetrics {
        purchase_price,
        down_payment,
        loan_amount,
        monthly_payment: payment,
        monthly_pmi,
        rent_per_room,
        rooms_rented,
        monthly_rental_income,
        monthly_reserves,
        net_monthly_housing_cost,
        market_rent_equivalent,
        monthly_savings_vs_renting,
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
            dec!(2400),
        );
        a.interest_rate = dec!(0.07);
        a.property_taxes = dec!(3600);
        a.insurance = dec!(1800);
        a.vacancy_rate = dec!(0.05);
        a.maintenance_pct = dec!(0.05);
        a.total_bedrooms = 3;
        a.rooms_rented = 2;
        a
    }

    #[test]
    fn test_fha_financing() {
        let m = metrics(dec!(300000), &sample_assumptions());
        assert_eq!(m.down_payment, dec!(10500.000));
        assert_eq!(m.loan_amount, dec!(289500.000));
        // PMI: 289,500 * 0.0085 / 12
        assert_eq!(m.monthly_pmi.round_dp(2), dec!(205.06));
    }

    #[test]
    fn test_room_income_and_reserves() {
        let m = metrics(dec!(300000), &sample_assumptions());
        assert_eq!(m.rent_per_room, dec!(800));
        assert_eq!(m.monthly_rental_income, dec!(1600));
        assert_eq!(m.monthly_reserves, dec!(160.00));
    }

    #[test]
    fn test_every_bedroom_rented_counts_in_full() {
        // Renting all three bedrooms (owner in a den or basement) earns
        // the full per-room income, with no silent cap.
        let mut a = sample_assumptions();
        a.rooms_rented = 3;
        let m = metrics(dec!(300000), &a);
        assert_eq!(m.rooms_rented, 3);
        assert_eq!(m.monthly_rental_income, dec!(2400));
    }

    #[test]
    fn test_zero_bedrooms_degenerate() {
        let mut a = sample_assumptions();
        a.total_bedrooms = 0;
        a.rooms_rented = 0;
        let m = metrics(dec!(300000), &a);
        assert_eq!(m.rent_per_room, Decimal::ZERO);
        assert_eq!(m.monthly_rental_income, Decimal::ZERO);
    }

    #[test]
    fn test_savings_vs_market_rent() {
        let m = metrics(dec!(300000), &sample_assumptions());
        assert_eq!(m.market_rent_equivalent, dec!(960.0));
        assert_eq!(
            m.monthly_savings_vs_renting,
            m.market_rent_equivalent - m.net_monthly_housing_cost
        );
    }
}
