use napi::Result as NapiResult;
use napi_derive::napi;

use dealiq_core::assumptions::DealAssumptions;
use dealiq_core::types::Strategy;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_strategy(id: &str) -> NapiResult<Strategy> {
    id.parse::<Strategy>().map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Strategy analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_strategy(strategy: String, price: String, assumptions_json: String) -> NapiResult<String> {
    let strategy = parse_strategy(&strategy)?;
    let price = price.parse().map_err(to_napi_error)?;
    let assumptions: DealAssumptions =
        serde_json::from_str(&assumptions_json).map_err(to_napi_error)?;
    let output = dealiq_core::strategies::analyze_strategy(strategy, price, &assumptions)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn target_price(strategy: String, assumptions_json: String) -> NapiResult<String> {
    let strategy = parse_strategy(&strategy)?;
    let assumptions: DealAssumptions =
        serde_json::from_str(&assumptions_json).map_err(to_napi_error)?;
    let output = dealiq_core::solver::target_price(strategy, &assumptions).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn score_deal(breakeven_price: String, list_price: String) -> NapiResult<String> {
    let breakeven = breakeven_price.parse().map_err(to_napi_error)?;
    let list = list_price.parse().map_err(to_napi_error)?;
    let output = dealiq_core::scoring::score_deal(breakeven, list, None).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn score_opportunity(
    breakeven_price: String,
    list_price: String,
    listing_json: Option<String>,
) -> NapiResult<String> {
    let breakeven = breakeven_price.parse().map_err(to_napi_error)?;
    let list = list_price.parse().map_err(to_napi_error)?;
    let listing: Option<dealiq_core::scoring::ListingInfo> = match listing_json {
        Some(json) => Some(serde_json::from_str(&json).map_err(to_napi_error)?),
        None => None,
    };
    let output = dealiq_core::scoring::score_opportunity(breakeven, list, listing.as_ref())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity and rehab
// ---------------------------------------------------------------------------

#[napi]
pub fn run_sensitivity(assumptions_json: String) -> NapiResult<String> {
    let assumptions: DealAssumptions =
        serde_json::from_str(&assumptions_json).map_err(to_napi_error)?;
    let output = dealiq_core::sensitivity::run_sensitivity(&assumptions).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn estimate_rehab(selections_json: String, contingency_pct: Option<String>) -> NapiResult<String> {
    let selections: Vec<dealiq_core::rehab::RehabSelection> =
        serde_json::from_str(&selections_json).map_err(to_napi_error)?;
    let contingency = match contingency_pct {
        Some(c) => Some(c.parse().map_err(to_napi_error)?),
        None => None,
    };
    let output =
        dealiq_core::rehab::estimate_rehab(&selections, contingency).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// The canonical default constants, for clients that need to mirror
/// them without recomputing.
#[napi]
pub fn canonical_defaults() -> NapiResult<String> {
    let defaults = dealiq_core::assumptions::CanonicalDefaults::default();
    serde_json::to_string(&defaults).map_err(to_napi_error)
}
