use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// The six supported investment strategies. Serialized as the short
/// identifiers clients use as cache-key components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "ltr")]
    LongTermRental,
    #[serde(rename = "str")]
    ShortTermRental,
    #[serde(rename = "brrrr")]
    Brrrr,
    #[serde(rename = "flip")]
    FixFlip,
    #[serde(rename = "house_hack")]
    HouseHack,
    #[serde(rename = "wholesale")]
    Wholesale,
}

impl Strategy {
    /// Stable identifier, also usable as a cache-key component.
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::LongTermRental => "ltr",
            Strategy::ShortTermRental => "str",
            Strategy::Brrrr => "brrrr",
            Strategy::FixFlip => "flip",
            Strategy::HouseHack => "house_hack",
            Strategy::Wholesale => "wholesale",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::LongTermRental => "Long-Term Rental",
            Strategy::ShortTermRental => "Short-Term Rental",
            Strategy::Brrrr => "BRRRR",
            Strategy::FixFlip => "Fix & Flip",
            Strategy::HouseHack => "House Hack",
            Strategy::Wholesale => "Wholesale",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ltr" | "long_term_rental" => Ok(Strategy::LongTermRental),
            "str" | "short_term_rental" => Ok(Strategy::ShortTermRental),
            "brrrr" => Ok(Strategy::Brrrr),
            "flip" | "fix_flip" => Ok(Strategy::FixFlip),
            "house_hack" | "househack" => Ok(Strategy::HouseHack),
            "wholesale" => Ok(Strategy::Wholesale),
            other => Err(format!("Unknown strategy '{other}'")),
        }
    }
}

/// Cash-on-cash return.
///
/// `Infinite` is a first-class result, not an error: a BRRRR deal that
/// recovers every dollar of invested cash has no denominator left, which
/// the domain reads as "infinite return".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashOnCash {
    Finite(Rate),
    Infinite,
}

impl CashOnCash {
    pub fn is_infinite(&self) -> bool {
        matches!(self, CashOnCash::Infinite)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round to the nearest integer, midpoints away from zero.
///
/// Score and price boundaries in this engine are documented against
/// `Math.round` semantics; banker's rounding would shift them.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a price to the nearest $1,000 for display stability.
pub fn round_to_thousand(price: Money) -> Money {
    round_half_up(price / dec!(1000)) * dec!(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_midpoint() {
        assert_eq!(round_half_up(dec!(88.5)), dec!(89));
        assert_eq!(round_half_up(dec!(88.4)), dec!(88));
        assert_eq!(round_half_up(dec!(-1.5)), dec!(-2));
    }

    #[test]
    fn test_round_to_thousand() {
        assert_eq!(round_to_thousand(dec!(284501)), dec!(285000));
        assert_eq!(round_to_thousand(dec!(284499)), dec!(284000));
        assert_eq!(round_to_thousand(dec!(284500)), dec!(285000));
    }

    #[test]
    fn test_strategy_ids_round_trip() {
        let all = [
            Strategy::LongTermRental,
            Strategy::ShortTermRental,
            Strategy::Brrrr,
            Strategy::FixFlip,
            Strategy::HouseHack,
            Strategy::Wholesale,
        ];
        for s in all {
            assert_eq!(s.id().parse::<Strategy>().unwrap(), s);
        }
    }
}
