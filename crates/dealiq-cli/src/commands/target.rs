use clap::Args;
use serde_json::Value;

use dealiq_core::solver::target_price;
use dealiq_core::types::Strategy;

use super::AssumptionArgs;

/// Arguments for the target-price solver
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TargetArgs {
    /// Strategy: ltr, str, brrrr, flip, house_hack or wholesale
    #[arg(long, short)]
    pub strategy: Strategy,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,
}

pub fn run(args: TargetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = args.assumptions.resolve()?;
    let output = target_price(args.strategy, &assumptions)?;
    Ok(serde_json::to_value(output)?)
}
