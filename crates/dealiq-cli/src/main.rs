mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::opportunity::OpportunityArgs;
use commands::rehab::RehabArgs;
use commands::score::ScoreArgs;
use commands::sensitivity::SensitivityArgs;
use commands::target::TargetArgs;

/// Real-estate investment deal analysis
#[derive(Parser)]
#[command(
    name = "dealiq",
    version,
    about = "Real-estate investment deal analysis with decimal precision",
    long_about = "Analyze residential investment deals across six strategies \
                  (long-term rental, short-term rental, BRRRR, fix & flip, \
                  house hack, wholesale): per-strategy metrics, target and \
                  breakeven prices, deal and opportunity scores, sensitivity \
                  sweeps and rehab estimates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute strategy metrics at a purchase price
    Analyze(AnalyzeArgs),
    /// Solve for a strategy's target and breakeven price
    Target(TargetArgs),
    /// Score a deal from its breakeven against list price
    Score(ScoreArgs),
    /// Weighted opportunity score with listing metadata
    Opportunity(OpportunityArgs),
    /// One-way sensitivity sweeps over the rental metrics
    Sensitivity(SensitivityArgs),
    /// Estimate rehab costs from catalog selections
    Rehab(RehabArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Target(args) => commands::target::run(args),
        Commands::Score(args) => commands::score::run(args),
        Commands::Opportunity(args) => commands::opportunity::run(args),
        Commands::Sensitivity(args) => commands::sensitivity::run(args),
        Commands::Rehab(args) => commands::rehab::run(args),
        Commands::Version => {
            println!("dealiq {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
