use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use dealiq_core::scoring::{score_opportunity, ListingInfo};
use dealiq_core::solver::target_price;
use dealiq_core::types::Strategy;

use super::AssumptionArgs;

/// Arguments for opportunity scoring
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct OpportunityArgs {
    /// Breakeven price; solved from the assumptions when omitted
    #[arg(long)]
    pub breakeven: Option<Decimal>,

    /// Strategy used to solve the breakeven when none is given
    #[arg(long, short, default_value = "ltr")]
    pub strategy: Strategy,

    /// Listing status string (e.g. FOR_SALE, WITHDRAWN, FSBO)
    #[arg(long)]
    pub status: Option<String>,

    /// Number of recorded price reductions
    #[arg(long, default_value = "0")]
    pub price_reductions: u32,

    /// Days on market
    #[arg(long)]
    pub days_on_market: Option<u32>,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,
}

pub fn run(args: OpportunityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = args.assumptions.resolve()?;
    let breakeven = match args.breakeven {
        Some(b) => b,
        None => {
            target_price(args.strategy, &assumptions)?
                .result
                .breakeven_price
        }
    };

    // Only build listing metadata when the caller supplied any; the
    // score degenerates to gap-only without it.
    let listing = if args.status.is_some()
        || args.price_reductions > 0
        || args.days_on_market.is_some()
    {
        Some(ListingInfo {
            status: args.status.clone(),
            price_reductions: args.price_reductions,
            days_on_market: args.days_on_market,
        })
    } else {
        None
    };

    let output = score_opportunity(breakeven, assumptions.list_price, listing.as_ref())?;
    Ok(serde_json::to_value(output)?)
}
