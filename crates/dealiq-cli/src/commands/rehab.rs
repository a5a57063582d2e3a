use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use dealiq_core::rehab::{estimate_rehab, preset, RehabSelection};

use crate::input;

/// Arguments for rehab estimation
#[derive(Args)]
pub struct RehabArgs {
    /// Path to a JSON file with an array of selections
    /// (item_id, quantity, tier)
    #[arg(long)]
    pub input: Option<String>,

    /// Named preset: cosmetic_refresh, full_cosmetic or gut_renovation
    #[arg(long)]
    pub preset: Option<String>,

    /// Contingency fraction (default 0.10)
    #[arg(long)]
    pub contingency: Option<Decimal>,
}

pub fn run(args: RehabArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let selections: Vec<RehabSelection> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else if let Some(ref name) = args.preset {
        preset(name).ok_or_else(|| format!("Unknown preset '{name}'"))?
    } else {
        return Err("--input, piped stdin or --preset is required".into());
    };

    let output = estimate_rehab(&selections, args.contingency)?;
    Ok(serde_json::to_value(output)?)
}
