use std::time::Instant;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DealIqError;
use crate::scoring::availability::{classify, Availability, ListingInfo};
use crate::scoring::deal_score::{discount_percent, gap_score};
use crate::types::{round_half_up, with_metadata, ComputationOutput, Money, Rate};
use crate::DealIqResult;

const WEIGHT_GAP: Decimal = dec!(0.5);
const WEIGHT_AVAILABILITY: Decimal = dec!(0.3);
const WEIGHT_DOM: Decimal = dec!(0.2);

/// Neutral sub-score used when a factor cannot be evaluated.
const NEUTRAL_SCORE: u32 = 50;

/// Grade on the weighted composite, with fixed presentation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpportunityGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl OpportunityGrade {
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => OpportunityGrade::APlus,
            70..=84 => OpportunityGrade::A,
            55..=69 => OpportunityGrade::B,
            40..=54 => OpportunityGrade::C,
            25..=39 => OpportunityGrade::D,
            _ => OpportunityGrade::F,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OpportunityGrade::APlus => "Exceptional opportunity",
            OpportunityGrade::A => "Strong opportunity",
            OpportunityGrade::B => "Solid opportunity",
            OpportunityGrade::C => "Marginal opportunity",
            OpportunityGrade::D => "Weak opportunity",
            OpportunityGrade::F => "Pass",
        }
    }

    /// UI hint passed through verbatim, never interpreted here.
    pub fn color(&self) -> &'static str {
        match self {
            OpportunityGrade::APlus => "#16a34a",
            OpportunityGrade::A => "#22c55e",
            OpportunityGrade::B => "#84cc16",
            OpportunityGrade::C => "#eab308",
            OpportunityGrade::D => "#f97316",
            OpportunityGrade::F => "#ef4444",
        }
    }
}

/// Negotiating leverage read off the days-on-market table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leverage {
    High,
    Medium,
    Low,
    Unknown,
}

/// One weighted factor in the composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factor {
    pub score: u32,
    pub weight: Decimal,
    pub detail: String,
}

/// Factor breakdown, always returned in full so callers can render
/// per-factor explanations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityFactors {
    pub deal_gap: Factor,
    pub availability: Factor,
    pub days_on_market: Factor,
    pub classification: Option<Availability>,
    pub leverage: Leverage,
}

/// Composite opportunity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityScore {
    pub score: u32,
    pub grade: OpportunityGrade,
    pub label: String,
    pub color: String,
    pub discount_percent: Rate,
    pub factors: OpportunityFactors,
}

/// Score an opportunity from the deal gap plus listing metadata.
///
/// Without listing metadata the availability and days-on-market factors
/// cannot be evaluated; they report neutral 50s at zero weight and the
/// composite collapses to the gap-only score.
pub fn score_opportunity(
    breakeven_price: Money,
    list_price: Money,
    listing: Option<&ListingInfo>,
) -> DealIqResult<ComputationOutput<OpportunityScore>> {
    let start = Instant::now();

    if list_price <= Decimal::ZERO {
        return Err(DealIqError::InvalidInput {
            field: "list_price".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let dp = discount_percent(breakeven_price, list_price);
    let gap = gap_score(dp);

    let result = match listing {
        Some(info) => scored_with_listing(dp, gap, info),
        None => gap_only(dp, gap),
    };

    Ok(with_metadata(
        "Weighted composite of deal gap, seller availability and \
         days-on-market leverage",
        &serde_json::json!({
            "breakeven_price": breakeven_price,
            "list_price": list_price,
            "listing": listing,
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    ))
}

fn scored_with_listing(dp: Rate, gap: u32, info: &ListingInfo) -> OpportunityScore {
    let classification = classify(info);
    let availability_score = classification.score();
    let (dom_score, leverage) = dom_factor(dp, info.days_on_market);

    let composite = round_half_up(
        WEIGHT_GAP * Decimal::from(gap)
            + WEIGHT_AVAILABILITY * Decimal::from(availability_score)
            + WEIGHT_DOM * Decimal::from(dom_score),
    )
    .to_u32()
    .unwrap_or(0);

    let grade = OpportunityGrade::from_score(composite);
    OpportunityScore {
        score: composite,
        grade,
        label: grade.label().to_string(),
        color: grade.color().to_string(),
        discount_percent: dp,
        factors: OpportunityFactors {
            deal_gap: Factor {
                score: gap,
                weight: WEIGHT_GAP,
                detail: format!("{dp:.1}% discount to breakeven"),
            },
            availability: Factor {
                score: availability_score,
                weight: WEIGHT_AVAILABILITY,
                detail: classification.label().to_string(),
            },
            days_on_market: Factor {
                score: dom_score,
                weight: WEIGHT_DOM,
                detail: match info.days_on_market {
                    Some(days) => format!("{days} days on market"),
                    None => "Days on market unknown".to_string(),
                },
            },
            classification: Some(classification),
            leverage,
        },
    }
}

fn gap_only(dp: Rate, gap: u32) -> OpportunityScore {
    let grade = OpportunityGrade::from_score(gap);
    OpportunityScore {
        score: gap,
        grade,
        label: grade.label().to_string(),
        color: grade.color().to_string(),
        discount_percent: dp,
        factors: OpportunityFactors {
            deal_gap: Factor {
                score: gap,
                weight: Decimal::ONE,
                detail: format!("{dp:.1}% discount to breakeven"),
            },
            availability: Factor {
                score: NEUTRAL_SCORE,
                weight: Decimal::ZERO,
                detail: "No listing metadata".to_string(),
            },
            days_on_market: Factor {
                score: NEUTRAL_SCORE,
                weight: Decimal::ZERO,
                detail: "No listing metadata".to_string(),
            },
            classification: None,
            leverage: Leverage::Unknown,
        },
    }
}

/// Days-on-market sub-score: higher deal gaps combined with longer
/// market time mean better negotiating leverage.
fn dom_factor(dp: Rate, days_on_market: Option<u32>) -> (u32, Leverage) {
    let days = match days_on_market {
        Some(d) => d,
        None => return (NEUTRAL_SCORE, Leverage::Unknown),
    };

    let row: [u32; 4] = if dp < dec!(10) {
        [30, 40, 50, 60]
    } else if dp < dec!(25) {
        [45, 55, 70, 80]
    } else {
        [60, 75, 90, 100]
    };
    let score = match days {
        0..=29 => row[0],
        30..=59 => row[1],
        60..=119 => row[2],
        _ => row[3],
    };

    let leverage = if score >= 75 {
        Leverage::High
    } else if score < 50 {
        Leverage::Low
    } else {
        Leverage::Medium
    };
    (score, leverage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(status: &str, reductions: u32, days: Option<u32>) -> ListingInfo {
        ListingInfo {
            status: Some(status.to_string()),
            price_reductions: reductions,
            days_on_market: days,
        }
    }

    #[test]
    fn test_composite_is_exact_weighted_sum() {
        // breakeven = list: gap 100; FOR_SALE+2 cuts: availability 90;
        // dp 0 < 10 and 200 days: dom 60.
        let out = score_opportunity(
            dec!(300000),
            dec!(300000),
            Some(&listing("FOR_SALE", 2, Some(200))),
        )
        .unwrap();
        // 0.5*100 + 0.3*90 + 0.2*60 = 89
        assert_eq!(out.result.score, 89);
        assert_eq!(out.result.grade, OpportunityGrade::APlus);
    }

    #[test]
    fn test_grade_boundary_at_85() {
        assert_eq!(OpportunityGrade::from_score(85), OpportunityGrade::APlus);
        assert_eq!(OpportunityGrade::from_score(84), OpportunityGrade::A);
        assert_eq!(OpportunityGrade::from_score(70), OpportunityGrade::A);
        assert_eq!(OpportunityGrade::from_score(24), OpportunityGrade::F);
    }

    #[test]
    fn test_missing_listing_degenerates_to_gap_score() {
        let with_gap = score_opportunity(dec!(285000), dec!(300000), None).unwrap();
        // Same as the plain deal score for a 5% discount.
        assert_eq!(with_gap.result.score, 89);
        assert_eq!(with_gap.result.factors.availability.weight, Decimal::ZERO);
        assert_eq!(with_gap.result.factors.leverage, Leverage::Unknown);
        assert!(with_gap.result.factors.classification.is_none());
    }

    #[test]
    fn test_dom_table_rows() {
        // Low gap, fresh listing: no leverage.
        assert_eq!(dom_factor(dec!(5), Some(10)), (30, Leverage::Low));
        // Mid gap, stale listing.
        assert_eq!(dom_factor(dec!(15), Some(130)), (80, Leverage::High));
        // High gap, 60-119 band.
        assert_eq!(dom_factor(dec!(30), Some(90)), (90, Leverage::High));
        // Band edges.
        assert_eq!(dom_factor(dec!(9.99), Some(29)).0, 30);
        assert_eq!(dom_factor(dec!(10), Some(30)).0, 55);
        assert_eq!(dom_factor(dec!(25), Some(120)).0, 100);
    }

    #[test]
    fn test_null_dom_is_neutral() {
        assert_eq!(dom_factor(dec!(30), None), (50, Leverage::Unknown));
    }

    #[test]
    fn test_composite_bounds() {
        for (be, list) in [(100, 300), (250, 300), (300, 300), (400, 300)] {
            let out = score_opportunity(
                Decimal::from(be * 1000),
                Decimal::from(list * 1000),
                Some(&listing("WITHDRAWN", 0, Some(150))),
            )
            .unwrap();
            assert!(out.result.score <= 100);
        }
    }
}
