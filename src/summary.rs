use crate::error::{HealthError, Result};
use crate::types::metrics::{Branch, BranchMonths, MetricTable, MonthIndex, MonthlyMetric};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchTotals {
    pub branch: Branch,
    pub revenue: Decimal,
    pub net_profit: Decimal,
    pub customers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: MonthIndex,
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub branch_count: usize,
    pub most_profitable: Option<BranchTotals>,
    pub least_profitable: Option<BranchTotals>,
    pub monthly_net_profit: Vec<MonthlyTotal>,
    pub branches: Vec<BranchTotals>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerShare {
    pub branch: Branch,
    pub customers: u64,
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDistribution {
    /// `None` covers the whole half-year.
    pub month: Option<MonthIndex>,
    pub total: u64,
    pub branches: Vec<CustomerShare>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchMonthValues {
    pub branch: Branch,
    pub revenue: Decimal,
    pub net_profit: Decimal,
    pub customers: u64,
    pub inventory_days: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSnapshot {
    pub month: MonthIndex,
    pub branches: Vec<BranchMonthValues>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparedMetric {
    Revenue,
    NetProfit,
    InventoryDays,
}

impl ComparedMetric {
    pub fn label(self) -> &'static str {
        match self {
            Self::Revenue => "revenue (millions)",
            Self::NetProfit => "net profit (millions)",
            Self::InventoryDays => "inventory days",
        }
    }

    fn read(self, metric: &MonthlyMetric) -> Decimal {
        match self {
            Self::Revenue => metric.revenue,
            Self::NetProfit => metric.net_profit,
            Self::InventoryDays => metric.inventory_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub month: MonthIndex,
    pub first: Decimal,
    pub second: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub metric: ComparedMetric,
    pub first: Branch,
    pub second: Branch,
    pub points: Vec<SeriesPoint>,
}

pub fn period_totals(table: &MetricTable) -> Vec<BranchTotals> {
    table
        .rows()
        .iter()
        .map(|row| {
            let mut totals = BranchTotals {
                branch: row.branch.clone(),
                revenue: Decimal::ZERO,
                net_profit: Decimal::ZERO,
                customers: 0,
            };
            for (_, metric) in row.iter() {
                totals.revenue = totals.revenue.saturating_add(metric.revenue);
                totals.net_profit = totals.net_profit.saturating_add(metric.net_profit);
                totals.customers = totals.customers.saturating_add(metric.customer_count);
            }
            totals
        })
        .collect()
}

pub fn dashboard(table: &MetricTable) -> Dashboard {
    let branches = period_totals(table);

    // First branch in configured order wins a tie on either end.
    let mut most: Option<&BranchTotals> = None;
    let mut least: Option<&BranchTotals> = None;
    for totals in &branches {
        if most.map_or(true, |best| totals.net_profit > best.net_profit) {
            most = Some(totals);
        }
        if least.map_or(true, |worst| totals.net_profit < worst.net_profit) {
            least = Some(totals);
        }
    }

    let monthly_net_profit = MonthIndex::all()
        .map(|month| MonthlyTotal {
            month,
            net_profit: table
                .rows()
                .iter()
                .map(|row| row.month(month).net_profit)
                .fold(Decimal::ZERO, Decimal::saturating_add),
        })
        .collect();

    Dashboard {
        branch_count: table.len(),
        most_profitable: most.cloned(),
        least_profitable: least.cloned(),
        monthly_net_profit,
        branches,
    }
}

pub fn customer_distribution(table: &MetricTable, month: Option<MonthIndex>) -> CustomerDistribution {
    let counts: Vec<(Branch, u64)> = table
        .rows()
        .iter()
        .map(|row| {
            let customers = match month {
                Some(month) => row.month(month).customer_count,
                None => row
                    .iter()
                    .map(|(_, metric)| metric.customer_count)
                    .fold(0, u64::saturating_add),
            };
            (row.branch.clone(), customers)
        })
        .collect();
    let total = counts
        .iter()
        .map(|(_, customers)| *customers)
        .fold(0, u64::saturating_add);

    let branches = counts
        .into_iter()
        .map(|(branch, customers)| {
            let share_percent = if total == 0 {
                Decimal::ZERO
            } else {
                (Decimal::from(customers) * Decimal::ONE_HUNDRED / Decimal::from(total))
                    .round_dp(2)
            };
            CustomerShare {
                branch,
                customers,
                share_percent,
            }
        })
        .collect();

    CustomerDistribution {
        month,
        total,
        branches,
    }
}

pub fn month_snapshot(table: &MetricTable, month: MonthIndex) -> MonthSnapshot {
    let branches = table
        .rows()
        .iter()
        .map(|row| {
            let metric = row.month(month);
            BranchMonthValues {
                branch: row.branch.clone(),
                revenue: metric.revenue,
                net_profit: metric.net_profit,
                customers: metric.customer_count,
                inventory_days: metric.inventory_days,
            }
        })
        .collect();
    MonthSnapshot { month, branches }
}

pub fn find_branch<'a>(table: &'a MetricTable, selector: &str) -> Result<&'a BranchMonths> {
    let selector = selector.trim();
    let by_id = selector
        .parse::<u32>()
        .ok()
        .and_then(|id| table.branch(id));
    by_id
        .or_else(|| {
            table
                .rows()
                .iter()
                .find(|row| row.branch.name.eq_ignore_ascii_case(selector))
        })
        .ok_or_else(|| HealthError::UnknownBranch(selector.to_string()))
}

pub fn compare(
    table: &MetricTable,
    first: &str,
    second: &str,
    metric: ComparedMetric,
) -> Result<Comparison> {
    let first = find_branch(table, first)?;
    let second = find_branch(table, second)?;

    let points = MonthIndex::all()
        .map(|month| SeriesPoint {
            month,
            first: metric.read(first.month(month)),
            second: metric.read(second.month(month)),
        })
        .collect();

    Ok(Comparison {
        metric,
        first: first.branch.clone(),
        second: second.branch.clone(),
        points,
    })
}
