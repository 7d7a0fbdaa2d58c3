pub mod aggregate;
pub mod normalize;
pub mod rank;
pub mod rules;
pub mod scenario;

use crate::types::config::{HealthConfig, ScenarioSet};
use crate::types::metrics::Branch;
use crate::types::records::{InventoryRecord, PerformanceRecord};
use crate::types::report::ScoreReport;
use aggregate::Aggregation;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub branches: Vec<Branch>,
    pub scenarios: ScenarioSet,
}

impl EngineConfig {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self {
            branches,
            scenarios: ScenarioSet::default(),
        }
    }

    pub fn from_config(config: &HealthConfig) -> Self {
        Self {
            scenarios: config.scenario_set(),
            ..Self::new(config.branches.clone())
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scoring {
    pub report: ScoreReport,
    pub aggregation: Aggregation,
}

pub struct ScoringEngine {
    config: EngineConfig,
}

impl ScoringEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn aggregate(
        &self,
        performance: &[PerformanceRecord],
        inventory: &[InventoryRecord],
    ) -> Aggregation {
        aggregate::aggregate(&self.config.branches, performance, inventory)
    }

    pub fn score(
        &self,
        performance: &[PerformanceRecord],
        inventory: &[InventoryRecord],
    ) -> Scoring {
        let aggregation = self.aggregate(performance, inventory);
        let report = scenario::run(
            &aggregation.table,
            &aggregation.customer_totals,
            &self.config.scenarios,
        );
        info!(
            branches = report.branch_names.len(),
            discarded = aggregation.discarded,
            "scoring complete"
        );
        Scoring {
            report,
            aggregation,
        }
    }
}
