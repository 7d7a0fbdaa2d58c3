use crate::engine::normalize::normalize;
use crate::engine::rank::rank;
use crate::engine::rules::evaluate;
use crate::types::config::ScenarioSet;
use crate::types::metrics::{MetricTable, MonthlyCustomerTotals};
use crate::types::report::{ScenarioFactors, ScenarioResult, ScoreReport};
use tracing::debug;

pub fn run_pass(
    table: &MetricTable,
    customer_totals: &MonthlyCustomerTotals,
    factors: ScenarioFactors,
) -> ScenarioResult {
    let raw_scores: Vec<_> = table
        .rows()
        .iter()
        .map(|row| evaluate(row, customer_totals, &factors))
        .collect();
    let scores: Vec<_> = raw_scores.iter().copied().map(normalize).collect();
    let labels = rank(&scores);

    debug!(
        inventory_day_factor = %factors.inventory_day_factor,
        net_profit_factor = %factors.net_profit_factor,
        ?scores,
        "scenario pass complete"
    );

    ScenarioResult {
        factors,
        raw_scores,
        scores,
        labels,
    }
}

pub fn run(
    table: &MetricTable,
    customer_totals: &MonthlyCustomerTotals,
    scenarios: &ScenarioSet,
) -> ScoreReport {
    ScoreReport {
        branch_names: table.branch_names(),
        base: run_pass(table, customer_totals, ScenarioFactors::BASE),
        scenario_a: run_pass(table, customer_totals, scenarios.inventory_stress),
        scenario_b: run_pass(table, customer_totals, scenarios.profit_stress),
    }
}
