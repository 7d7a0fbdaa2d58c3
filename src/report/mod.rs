pub mod json;
pub mod md;

use crate::error::HealthError;
use crate::summary::{Comparison, CustomerDistribution, Dashboard, MonthSnapshot};
use crate::types::report::ScoreReport;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Serialize)]
struct SummaryView<'a> {
    dashboard: &'a Dashboard,
    customers: &'a CustomerDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<&'a MonthSnapshot>,
}

pub fn render_scores(
    report: &ScoreReport,
    format: OutputFormat,
    fiscal_year: Option<i32>,
) -> Result<String, HealthError> {
    match format {
        OutputFormat::Json => json::to_json(report, fiscal_year).map_err(HealthError::Json),
        OutputFormat::Md => Ok(md::score_markdown(report)),
    }
}

pub fn render_summary(
    dashboard: &Dashboard,
    customers: &CustomerDistribution,
    snapshot: Option<&MonthSnapshot>,
    format: OutputFormat,
    fiscal_year: Option<i32>,
) -> Result<String, HealthError> {
    match format {
        OutputFormat::Json => json::to_json(
            &SummaryView {
                dashboard,
                customers,
                snapshot,
            },
            fiscal_year,
        )
        .map_err(HealthError::Json),
        OutputFormat::Md => Ok(md::summary_markdown(dashboard, customers, snapshot)),
    }
}

pub fn render_comparison(
    comparison: &Comparison,
    format: OutputFormat,
    fiscal_year: Option<i32>,
) -> Result<String, HealthError> {
    match format {
        OutputFormat::Json => json::to_json(comparison, fiscal_year).map_err(HealthError::Json),
        OutputFormat::Md => Ok(md::comparison_markdown(comparison)),
    }
}
