pub mod audit;
pub mod fields;

use crate::error::{HealthError, Result};
use crate::types::config::HealthConfig;
use crate::types::records::{InventoryRecord, PerformanceRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use fields::{
    is_malformed, parse_count_field, parse_id_field, parse_metric_field, parse_month_field,
    parse_year_field,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
struct PerformanceRow {
    #[serde(default)]
    year: String,
    #[serde(default)]
    branch_id: String,
    #[serde(default)]
    month: String,
    #[serde(default, alias = "revenue")]
    revenue_million: String,
    #[serde(default, alias = "net_profit")]
    net_profit_million: String,
    #[serde(default)]
    customer_count: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct InventoryRow {
    #[serde(default)]
    year: String,
    #[serde(default)]
    branch_id: String,
    #[serde(default)]
    month: String,
    #[serde(default)]
    inventory_days: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercedField {
    pub file: String,
    pub line: u64,
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub performance: Vec<PerformanceRecord>,
    pub inventory: Vec<InventoryRecord>,
    pub coerced: Vec<CoercedField>,
    pub filtered_by_year: usize,
}

pub fn data_paths(root: &Path, config: &HealthConfig) -> (PathBuf, PathBuf) {
    (
        root.join(&config.data.performance),
        root.join(&config.data.inventory),
    )
}

pub fn load_dataset(root: &Path, config: &HealthConfig, year: Option<i32>) -> Result<Dataset> {
    let (performance_path, inventory_path) = data_paths(root, config);
    let mut dataset = Dataset::default();

    for (line, row) in read_rows::<PerformanceRow>(&performance_path)? {
        if !matches_year(&row.year, year) {
            dataset.filtered_by_year += 1;
            continue;
        }
        let file = config.data.performance.as_str();
        for (column, value) in [
            ("branch_id", &row.branch_id),
            ("month", &row.month),
            ("revenue_million", &row.revenue_million),
            ("net_profit_million", &row.net_profit_million),
            ("customer_count", &row.customer_count),
        ] {
            note_coercion(&mut dataset.coerced, file, line, column, value);
        }
        dataset.performance.push(PerformanceRecord {
            branch_id: parse_id_field(&row.branch_id),
            month: parse_month_field(&row.month),
            revenue: parse_metric_field(&row.revenue_million),
            net_profit: parse_metric_field(&row.net_profit_million),
            customer_count: parse_count_field(&row.customer_count),
        });
    }

    for (line, row) in read_rows::<InventoryRow>(&inventory_path)? {
        if !matches_year(&row.year, year) {
            dataset.filtered_by_year += 1;
            continue;
        }
        let file = config.data.inventory.as_str();
        for (column, value) in [
            ("branch_id", &row.branch_id),
            ("month", &row.month),
            ("inventory_days", &row.inventory_days),
        ] {
            note_coercion(&mut dataset.coerced, file, line, column, value);
        }
        dataset.inventory.push(InventoryRecord {
            branch_id: parse_id_field(&row.branch_id),
            month: parse_month_field(&row.month),
            inventory_days: parse_metric_field(&row.inventory_days),
        });
    }

    info!(
        performance = dataset.performance.len(),
        inventory = dataset.inventory.len(),
        filtered_by_year = dataset.filtered_by_year,
        ?year,
        "dataset loaded"
    );
    Ok(dataset)
}

fn matches_year(raw: &str, year: Option<i32>) -> bool {
    match year {
        Some(selected) => parse_year_field(raw) == Some(selected),
        None => true,
    }
}

fn note_coercion(
    coerced: &mut Vec<CoercedField>,
    file: &str,
    line: u64,
    column: &'static str,
    value: &str,
) {
    if is_malformed(value) {
        warn!(file, line, column, value, "non-numeric value read as zero");
        coerced.push(CoercedField {
            file: file.to_string(),
            line,
            column,
            value: value.to_string(),
        });
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<(u64, T)>> {
    let file = File::open(path)
        .map_err(|e| HealthError::DataUnavailable(format!("{}: {}", path.display(), e)))?;
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);
    let headers = reader.headers()?.clone();
    debug!(path = %path.display(), columns = headers.len(), "reading records");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record: StringRecord = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        rows.push((line, record.deserialize(Some(&headers))?));
    }
    Ok(rows)
}
