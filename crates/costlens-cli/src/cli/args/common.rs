//! Shared argument types used across multiple commands.

use clap::ValueEnum;
use costlens_core::{Side, SortMode};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum ScenarioArg {
    #[default]
    A,
    B,
}

impl From<ScenarioArg> for Side {
    fn from(s: ScenarioArg) -> Self {
        match s {
            ScenarioArg::A => Side::A,
            ScenarioArg::B => Side::B,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum SortArg {
    /// Largest absolute change first
    Impact,
    /// Catalog order
    Category,
}

impl From<SortArg> for SortMode {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Impact => SortMode::Impact,
            SortArg::Category => SortMode::Category,
        }
    }
}

#[derive(clap::Args, Clone, Debug)]
pub struct InputArgs {
    /// Workspace document (YAML or JSON): catalog, benchmarks and scenarios
    #[arg(long, short = 'i', env = "COSTLENS_INPUT")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "COSTLENS_FORMAT")]
    pub format: OutputFormat,
}
