use std::time::Instant;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DealIqError;
use crate::strategies::LtrMetrics;
use crate::types::{round_half_up, with_metadata, ComputationOutput, Money, Rate};
use crate::DealIqResult;

/// Letter grade assigned from the discount-to-breakeven percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl DealGrade {
    /// Band boundaries are inclusive on the upper end.
    pub fn from_discount_percent(dp: Rate) -> Self {
        if dp <= dec!(5) {
            DealGrade::APlus
        } else if dp <= dec!(10) {
            DealGrade::A
        } else if dp <= dec!(15) {
            DealGrade::B
        } else if dp <= dec!(25) {
            DealGrade::C
        } else if dp <= dec!(35) {
            DealGrade::D
        } else {
            DealGrade::F
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DealGrade::APlus => "Excellent Deal",
            DealGrade::A => "Great Deal",
            DealGrade::B => "Good Deal",
            DealGrade::C => "Fair Deal",
            DealGrade::D => "Below Market Fit",
            DealGrade::F => "Poor Fit",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            DealGrade::APlus => "Priced at or near breakeven; strong buy candidate as listed",
            DealGrade::A => "Small discount needed; worth pursuing with a modest offer",
            DealGrade::B => "Workable with a below-ask offer",
            DealGrade::C => "Needs a significant discount to pencil",
            DealGrade::D => "Far from working at anything close to list",
            DealGrade::F => "Does not pencil under these assumptions",
        }
    }
}

/// Deal score output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealScore {
    /// 0-100, linear in the discount: 0% discount scores 100, 45%+
    /// scores 0.
    pub score: u32,
    pub grade: DealGrade,
    pub label: String,
    pub verdict: String,
    pub discount_percent: Rate,
    pub breakeven_price: Money,
    pub list_price: Money,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Score a deal from its breakeven price against list, with optional
/// long-term rental metrics enriching the strengths and weaknesses.
pub fn score_deal(
    breakeven_price: Money,
    list_price: Money,
    metrics: Option<&LtrMetrics>,
) -> DealIqResult<ComputationOutput<DealScore>> {
    let start = Instant::now();

    if list_price <= Decimal::ZERO {
        return Err(DealIqError::InvalidInput {
            field: "list_price".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let result = build_score(breakeven_price, list_price, metrics);

    Ok(with_metadata(
        "Linear 0-100 score over the discount from list to breakeven, \
         graded on fixed discount bands",
        &serde_json::json!({
            "breakeven_price": breakeven_price,
            "list_price": list_price,
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    ))
}

/// Legacy metric-only scoring path.
///
/// Estimates breakeven as `price + annual_cash_flow x 10`, a rough
/// linearization kept for callers without a solved breakeven. It does
/// not agree with the bisection breakeven and is not meant to.
pub fn score_deal_from_metrics(
    purchase_price: Money,
    metrics: &LtrMetrics,
) -> DealIqResult<ComputationOutput<DealScore>> {
    let rough_breakeven = purchase_price + metrics.annual_cash_flow * dec!(10);
    score_deal(rough_breakeven, purchase_price, Some(metrics))
}

pub(crate) fn discount_percent(breakeven_price: Money, list_price: Money) -> Rate {
    ((list_price - breakeven_price) / list_price * dec!(100)).max(Decimal::ZERO)
}

/// Linear score from the discount percentage, clamped to [0, 100].
pub(crate) fn gap_score(dp: Rate) -> u32 {
    let raw = round_half_up(dec!(100) - dp * dec!(100) / dec!(45));
    raw.clamp(Decimal::ZERO, dec!(100)).to_u32().unwrap_or(0)
}

fn build_score(breakeven_price: Money, list_price: Money, metrics: Option<&LtrMetrics>) -> DealScore {
    let dp = discount_percent(breakeven_price, list_price);
    let score = gap_score(dp);
    let grade = DealGrade::from_discount_percent(dp);

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    match grade {
        DealGrade::APlus => strengths.push("Breakeven at or above list price".to_string()),
        DealGrade::A => strengths.push("Breakeven within 10% of list price".to_string()),
        DealGrade::B => strengths.push("Breakeven within reach of a negotiated offer".to_string()),
        DealGrade::C => {
            weaknesses.push("Needs a double-digit discount to break even".to_string())
        }
        DealGrade::D | DealGrade::F => {
            weaknesses.push("Breakeven far below list price".to_string())
        }
    }

    if let Some(m) = metrics {
        if m.monthly_cash_flow >= dec!(300) {
            strengths.push("Strong monthly cash flow at list price".to_string());
        }
        if m.dscr >= dec!(1.25) {
            strengths.push("Debt service comfortably covered".to_string());
        }
        if m.monthly_cash_flow < Decimal::ZERO {
            weaknesses.push("Negative cash flow at list price".to_string());
        }
        if m.dscr < Decimal::ONE && !m.dscr.is_zero() {
            weaknesses.push("Income does not cover debt service".to_string());
        }
    }

    strengths.truncate(4);
    weaknesses.truncate(4);

    DealScore {
        score,
        grade,
        label: grade.label().to_string(),
        verdict: grade.verdict().to_string(),
        discount_percent: dp,
        breakeven_price,
        list_price,
        strengths,
        weaknesses,
    }
}
