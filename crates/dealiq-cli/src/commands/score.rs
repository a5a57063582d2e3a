use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use dealiq_core::scoring::score_deal;
use dealiq_core::solver::target_price;
use dealiq_core::types::Strategy;

use super::AssumptionArgs;

/// Arguments for deal scoring
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScoreArgs {
    /// Breakeven price; solved from the assumptions when omitted
    #[arg(long)]
    pub breakeven: Option<Decimal>,

    /// Strategy used to solve the breakeven when none is given
    #[arg(long, short, default_value = "ltr")]
    pub strategy: Strategy,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,
}

pub fn run(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = args.assumptions.resolve()?;
    let breakeven = match args.breakeven {
        Some(b) => b,
        None => {
            target_price(args.strategy, &assumptions)?
                .result
                .breakeven_price
        }
    };
    let output = score_deal(breakeven, assumptions.list_price, None)?;
    Ok(serde_json::to_value(output)?)
}
