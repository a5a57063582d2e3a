use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1).
///
/// Zero-rate loans amortize straight-line. This layer does no validation:
/// callers guarantee `term_years > 0`, and a non-positive principal simply
/// produces a non-positive payment, which the bisection solver relies on.
pub fn monthly_payment(principal: Money, annual_rate: Rate, term_years: u32) -> Money {
    let n = term_years * 12;
    if n == 0 {
        return Decimal::ZERO;
    }

    if annual_rate.is_zero() {
        return principal / Decimal::from(n);
    }

    let monthly_rate = annual_rate / dec!(12);
    let compound = (Decimal::ONE + monthly_rate).powi(n as i64);
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    principal * monthly_rate * compound / denominator
}

/// Outstanding balance after `months_elapsed` payments, tracked through the
/// amortization schedule.
pub fn loan_balance(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    months_elapsed: u32,
) -> Money {
    let n = term_years * 12;
    if n == 0 || principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let paid_months = months_elapsed.min(n);

    if annual_rate.is_zero() {
        let paid = principal * Decimal::from(paid_months) / Decimal::from(n);
        return principal - paid;
    }

    let monthly_rate = annual_rate / dec!(12);
    let payment = monthly_payment(principal, annual_rate, term_years);

    let mut balance = principal;
    for _ in 0..paid_months {
        let interest = balance * monthly_rate;
        balance -= payment - interest;
        if balance < Decimal::ZERO {
            return Decimal::ZERO;
        }
    }

    balance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_reference_case() {
        // $240k at 6% over 30 years: 240000 * 0.005 * 1.005^360 / (1.005^360 - 1)
        // = $1,438.9213/mo.
        let payment = monthly_payment(dec!(240000), dec!(0.06), 30);
        assert!(
            (payment - dec!(1438.92)).abs() < dec!(0.01),
            "expected ~1438.92, got {payment}"
        );
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let payment = monthly_payment(dec!(360000), Decimal::ZERO, 30);
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_negative_principal_degenerate() {
        // The solver probes degenerate prices without exception handling;
        // a negative principal must flow through as a negative payment.
        let payment = monthly_payment(dec!(-100000), dec!(0.06), 30);
        assert!(payment < Decimal::ZERO);
    }

    #[test]
    fn test_balance_start_and_maturity() {
        let balance0 = loan_balance(dec!(240000), dec!(0.06), 30, 0);
        assert_eq!(balance0, dec!(240000));

        let balance_end = loan_balance(dec!(240000), dec!(0.06), 30, 360);
        assert!(balance_end.abs() < dec!(1), "residual {balance_end}");
    }

    #[test]
    fn test_balance_decreases() {
        let b12 = loan_balance(dec!(240000), dec!(0.06), 30, 12);
        let b60 = loan_balance(dec!(240000), dec!(0.06), 30, 60);
        assert!(b12 < dec!(240000));
        assert!(b60 < b12);
    }
}
