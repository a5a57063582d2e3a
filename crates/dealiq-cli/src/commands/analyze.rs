use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use dealiq_core::strategies::analyze_strategy;
use dealiq_core::types::Strategy;

use super::AssumptionArgs;

/// Arguments for strategy analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Strategy: ltr, str, brrrr, flip, house_hack or wholesale
    #[arg(long, short)]
    pub strategy: Strategy,

    /// Purchase price to evaluate (defaults to the list price)
    #[arg(long)]
    pub price: Option<Decimal>,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,
}

pub fn run(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = args.assumptions.resolve()?;
    let price = args.price.unwrap_or(assumptions.list_price);
    let output = analyze_strategy(args.strategy, price, &assumptions)?;
    Ok(serde_json::to_value(output)?)
}
