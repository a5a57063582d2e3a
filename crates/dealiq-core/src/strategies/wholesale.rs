use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::DealAssumptions;
use crate::types::Money;

/// End buyers underwrite to the 70% rule, so the assignable ceiling
/// starts from 70% of ARV.
const END_BUYER_PCT: Decimal = dec!(0.70);

/// Wholesale assignment metrics at a single contract price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholesaleMetrics {
    pub contract_price: Money,
    pub arv: Money,
    pub rehab_cost: Money,
    /// Maximum allowable offer an end buyer would accept.
    pub max_allowable_offer: Money,
    /// Spread between the end-buyer ceiling and the contract price.
    pub assignment_fee: Money,
    /// What the end buyer clears if they pay the full ceiling.
    pub end_buyer_profit: Money,
    pub viable: bool,
}

/// Wholesale model: get the property under contract below the end
/// buyer's maximum allowable offer and assign the contract for the
/// difference.
pub fn metrics(contract_price: Money, a: &DealAssumptions) -> WholesaleMetrics {
    let wholesale_fee = a.list_price * a.wholesale_fee_pct;
    let max_allowable_offer = a.arv * END_BUYER_PCT - a.rehab_cost - wholesale_fee;
    let assignment_fee = max_allowable_offer - contract_price;
    let end_buyer_profit = a.arv - max_allowable_offer - a.rehab_cost;

    WholesaleMetrics {
        contract_price,
        arv: a.arv,
        rehab_cost: a.rehab_cost,
        max_allowable_offer,
        assignment_fee,
        end_buyer_profit,
        viable: assignment_fee > Decimal::ZERO,
    }
}
