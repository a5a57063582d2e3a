use clap::Args;
use serde_json::Value;

use dealiq_core::sensitivity::run_sensitivity;

use super::AssumptionArgs;

/// Arguments for sensitivity sweeps
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SensitivityArgs {
    #[command(flatten)]
    pub assumptions: AssumptionArgs,
}

pub fn run(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = args.assumptions.resolve()?;
    let output = run_sensitivity(&assumptions)?;
    Ok(serde_json::to_value(output)?)
}
