use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub use common::*;

#[derive(Parser, Debug)]
#[command(
    name = "costlens",
    version,
    about = "Facility cost exposure: price a scenario, or compare two and see what drives the change"
)]
pub struct Cli {
    /// Settings file (defaults for area, fallback band and heat thresholds)
    #[arg(long, global = true, env = "COSTLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price one scenario into a per-category breakdown
    Evaluate(EvaluateArgs),
    /// Evaluate scenarios A and B and report the per-category delta
    Compare(CompareArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, value_enum, default_value_t = ScenarioArg::A)]
    pub scenario: ScenarioArg,

    /// Override the scenario's area (must be > 0)
    #[arg(long, env = "COSTLENS_AREA")]
    pub area: Option<f64>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Row order (default: settings, then impact)
    #[arg(long, value_enum, env = "COSTLENS_SORT")]
    pub sort: Option<SortArg>,

    /// Only print the top driver rows
    #[arg(long)]
    pub drivers_only: bool,

    /// Medium heat threshold as a fraction of the baseline total
    #[arg(long, env = "COSTLENS_MEDIUM_THRESHOLD")]
    pub medium_threshold: Option<f64>,

    /// High heat threshold as a fraction of the baseline total
    #[arg(long, env = "COSTLENS_HIGH_THRESHOLD")]
    pub high_threshold: Option<f64>,
}
