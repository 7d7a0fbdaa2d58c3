use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "branch-health",
    version,
    about = "Retail branch health scoring and stress scenario CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score branches under the base and both stress scenarios
    Score(ScoreCommand),
    /// Period totals, profit extremes and customer distribution
    Summary(SummaryCommand),
    /// Six-month series of one metric for two branches
    Compare(CompareCommand),
    /// Audit raw records for rows the engine would ignore or coerce
    Check(CheckCommand),
}

#[derive(Args)]
pub struct DatasetArgs {
    /// Directory containing branch-health.toml and the record files
    pub path: PathBuf,
    /// Fiscal year to select (overrides project.fiscal_year)
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SummaryCommand {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Month for the customer distribution and branch snapshot (1-6, 0 for the whole period)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub month: u8,
}

#[derive(Args)]
pub struct CompareCommand {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// First branch (id or name)
    pub first: String,
    /// Second branch (id or name)
    pub second: String,
    #[arg(long, value_enum, default_value = "net-profit")]
    pub metric: MetricChoice,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MetricChoice {
    Revenue,
    NetProfit,
    InventoryDays,
}
