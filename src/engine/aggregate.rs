use crate::types::metrics::{
    Branch, BranchMonths, MetricTable, MonthIndex, MonthlyCustomerTotals, MonthlyMetric,
};
use crate::types::records::{InventoryRecord, PerformanceRecord};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub table: MetricTable,
    pub customer_totals: MonthlyCustomerTotals,
    pub discarded: usize,
}

#[derive(Debug)]
pub struct MetricTableBuilder {
    rows: Vec<BranchMonths>,
    discarded: usize,
}

impl MetricTableBuilder {
    pub fn new(branches: &[Branch]) -> Self {
        Self {
            rows: branches.iter().cloned().map(BranchMonths::zeroed).collect(),
            discarded: 0,
        }
    }

    pub fn fold_performance(mut self, records: &[PerformanceRecord]) -> Self {
        for record in records {
            if let Some(metric) = self.slot(record.branch_id, record.month) {
                metric.revenue = record.revenue;
                metric.net_profit = record.net_profit;
                metric.customer_count = record.customer_count;
            } else {
                debug!(
                    branch_id = record.branch_id,
                    month = record.month,
                    "discarding performance record"
                );
                self.discarded += 1;
            }
        }
        self
    }

    pub fn fold_inventory(mut self, records: &[InventoryRecord]) -> Self {
        for record in records {
            if let Some(metric) = self.slot(record.branch_id, record.month) {
                metric.inventory_days = record.inventory_days;
            } else {
                debug!(
                    branch_id = record.branch_id,
                    month = record.month,
                    "discarding inventory record"
                );
                self.discarded += 1;
            }
        }
        self
    }

    pub fn finish(self) -> Aggregation {
        let table = MetricTable::from_rows(self.rows);
        let customer_totals = MonthlyCustomerTotals::from_table(&table);
        Aggregation {
            table,
            customer_totals,
            discarded: self.discarded,
        }
    }

    fn slot(&mut self, branch_id: u32, month: u8) -> Option<&mut MonthlyMetric> {
        let month = MonthIndex::new(month)?;
        self.rows
            .iter_mut()
            .find(|row| row.branch.id == branch_id)
            .map(|row| row.month_mut(month))
    }
}

pub fn aggregate(
    branches: &[Branch],
    performance: &[PerformanceRecord],
    inventory: &[InventoryRecord],
) -> Aggregation {
    MetricTableBuilder::new(branches)
        .fold_performance(performance)
        .fold_inventory(inventory)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn branches() -> Vec<Branch> {
        vec![Branch::new(1, "Gaziemir"), Branch::new(2, "Bayrakli")]
    }

    fn month(value: u8) -> MonthIndex {
        MonthIndex::new(value).expect("valid month")
    }

    fn perf(branch_id: u32, month: u8, customers: u64) -> PerformanceRecord {
        PerformanceRecord {
            branch_id,
            month,
            revenue: dec!(250),
            net_profit: dec!(12.5),
            customer_count: customers,
        }
    }

    #[test]
    fn empty_streams_produce_zero_filled_table() {
        let result = aggregate(&branches(), &[], &[]);
        assert_eq!(result.table.len(), 2);
        assert_eq!(result.discarded, 0);
        for row in result.table.rows() {
            for (_, metric) in row.iter() {
                assert_eq!(*metric, MonthlyMetric::default());
            }
        }
        for m in MonthIndex::all() {
            assert_eq!(result.customer_totals.get(m), 0);
        }
    }

    #[test]
    fn merges_both_streams_into_same_cell() {
        let inventory = [InventoryRecord {
            branch_id: 2,
            month: 4,
            inventory_days: dec!(38.5),
        }];
        let result = aggregate(&branches(), &[perf(2, 4, 120)], &inventory);

        let cell = result
            .table
            .branch(2)
            .expect("branch exists")
            .month(month(4));
        assert_eq!(cell.revenue, dec!(250));
        assert_eq!(cell.net_profit, dec!(12.5));
        assert_eq!(cell.customer_count, 120);
        assert_eq!(cell.inventory_days, dec!(38.5));

        let untouched = result
            .table
            .branch(1)
            .expect("branch exists")
            .month(month(4));
        assert_eq!(untouched.inventory_days, Decimal::ZERO);
    }

    #[test]
    fn unknown_branches_and_months_are_discarded() {
        let inventory = [InventoryRecord {
            branch_id: 1,
            month: 0,
            inventory_days: dec!(20),
        }];
        let performance = [perf(9, 1, 500), perf(1, 7, 500), perf(1, 1, 50)];
        let result = aggregate(&branches(), &performance, &inventory);

        assert_eq!(result.discarded, 3);
        assert_eq!(result.customer_totals.get(month(1)), 50);
        assert!(result.table.branch(9).is_none());
    }

    #[test]
    fn customer_totals_span_all_branches() {
        let performance = [perf(1, 2, 30), perf(2, 2, 70), perf(2, 3, 10)];
        let result = aggregate(&branches(), &performance, &[]);
        assert_eq!(result.customer_totals.get(month(2)), 100);
        assert_eq!(result.customer_totals.get(month(3)), 10);
        assert_eq!(result.customer_totals.get(month(6)), 0);
    }

    #[test]
    fn later_duplicate_record_wins() {
        let performance = [perf(1, 5, 10), perf(1, 5, 25)];
        let result = aggregate(&branches(), &performance, &[]);
        let cell = result
            .table
            .branch(1)
            .expect("branch exists")
            .month(month(5));
        assert_eq!(cell.customer_count, 25);
        assert_eq!(result.customer_totals.get(month(5)), 25);
    }

    #[test]
    fn table_keeps_configured_branch_order() {
        let ordered = vec![Branch::new(5, "Selcuk"), Branch::new(1, "Gaziemir")];
        let result = aggregate(&ordered, &[], &[]);
        assert_eq!(result.table.branch_names(), vec!["Selcuk", "Gaziemir"]);
    }
}
