mod cli;
mod config;
mod engine;
mod error;
mod ingest;
mod report;
mod summary;
mod telemetry;
mod types;

use crate::engine::{EngineConfig, ScoringEngine};
use crate::error::HealthError;
use crate::ingest::Dataset;
use crate::types::config::HealthConfig;
use crate::types::metrics::MonthIndex;
use clap::Parser;
use tracing::{info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

struct Loaded {
    config: HealthConfig,
    dataset: Dataset,
    year: Option<i32>,
}

fn load(args: &cli::DatasetArgs) -> Result<Loaded, HealthError> {
    if !args.path.exists() {
        return Err(HealthError::PathNotFound(args.path.display().to_string()));
    }
    let config = config::load_config(&args.path)?;
    let year = args.year.or(config.project.fiscal_year);
    info!(project = %config.project.name, ?year, "configuration loaded");
    let dataset = ingest::load_dataset(&args.path, &config, year)?;
    Ok(Loaded {
        config,
        dataset,
        year,
    })
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32, HealthError> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let loaded = load(&cmd.dataset)?;
            let engine = ScoringEngine::new(EngineConfig::from_config(&loaded.config));
            let scoring = engine.score(&loaded.dataset.performance, &loaded.dataset.inventory);
            if scoring.aggregation.discarded > 0 {
                warn!(
                    discarded = scoring.aggregation.discarded,
                    "records ignored; run `check` for details"
                );
            }
            if let Some(top) = scoring.report.base.top_performer() {
                info!(branch = %scoring.report.branch_names[top], "base top performer");
            }

            let rendered =
                report::render_scores(&scoring.report, output_format(&cmd.format), loaded.year)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Summary(cmd) => {
            let loaded = load(&cmd.dataset)?;
            let engine = ScoringEngine::new(EngineConfig::from_config(&loaded.config));
            let aggregation =
                engine.aggregate(&loaded.dataset.performance, &loaded.dataset.inventory);

            // 0 selects the whole period.
            let month = MonthIndex::new(cmd.month);
            let view = summary::dashboard(&aggregation.table);
            let customers = summary::customer_distribution(&aggregation.table, month);
            let snapshot = month.map(|month| summary::month_snapshot(&aggregation.table, month));

            let rendered = report::render_summary(
                &view,
                &customers,
                snapshot.as_ref(),
                output_format(&cmd.format),
                loaded.year,
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Compare(cmd) => {
            let loaded = load(&cmd.dataset)?;
            let engine = ScoringEngine::new(EngineConfig::from_config(&loaded.config));
            let aggregation =
                engine.aggregate(&loaded.dataset.performance, &loaded.dataset.inventory);

            let metric = match cmd.metric {
                cli::MetricChoice::Revenue => summary::ComparedMetric::Revenue,
                cli::MetricChoice::NetProfit => summary::ComparedMetric::NetProfit,
                cli::MetricChoice::InventoryDays => summary::ComparedMetric::InventoryDays,
            };
            let comparison =
                summary::compare(&aggregation.table, &cmd.first, &cmd.second, metric)?;

            let rendered =
                report::render_comparison(&comparison, output_format(&cmd.format), loaded.year)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            let loaded = load(&cmd.dataset)?;
            let findings = ingest::audit::audit(&loaded.config.branches, &loaded.dataset);

            if findings.is_empty() {
                println!(
                    "check: no findings ({} performance, {} inventory rows)",
                    loaded.dataset.performance.len(),
                    loaded.dataset.inventory.len()
                );
                return Ok(exit_code::SUCCESS);
            }

            for finding in &findings {
                println!("[WARN] {}: {}", finding.id, finding.title);
                println!("  {}", finding.body);
            }
            Ok(exit_code::WARNINGS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
