use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTHS_PER_PERIOD: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: u32,
    pub name: String,
}

impl Branch {
    #[cfg(test)]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Month of the fiscal half-year, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthIndex(u8);

impl MonthIndex {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = MONTHS_PER_PERIOD as u8;

    pub fn new(month: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST)
            .contains(&month)
            .then_some(Self(month))
    }

    pub fn all() -> impl Iterator<Item = MonthIndex> {
        (Self::FIRST..=Self::LAST).map(MonthIndex)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub(crate) fn slot(self) -> usize {
        usize::from(self.0 - Self::FIRST)
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.get())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyMetric {
    pub revenue: Decimal,
    pub net_profit: Decimal,
    pub customer_count: u64,
    pub inventory_days: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchMonths {
    pub branch: Branch,
    months: [MonthlyMetric; MONTHS_PER_PERIOD],
}

impl BranchMonths {
    pub fn zeroed(branch: Branch) -> Self {
        Self {
            branch,
            months: [MonthlyMetric::default(); MONTHS_PER_PERIOD],
        }
    }

    pub fn month(&self, month: MonthIndex) -> &MonthlyMetric {
        &self.months[month.slot()]
    }

    pub(crate) fn month_mut(&mut self, month: MonthIndex) -> &mut MonthlyMetric {
        &mut self.months[month.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthIndex, &MonthlyMetric)> {
        MonthIndex::all().zip(self.months.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTable {
    rows: Vec<BranchMonths>,
}

impl MetricTable {
    pub(crate) fn from_rows(rows: Vec<BranchMonths>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[BranchMonths] {
        &self.rows
    }

    pub fn branch(&self, id: u32) -> Option<&BranchMonths> {
        self.rows.iter().find(|row| row.branch.id == id)
    }

    pub fn branch_names(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.branch.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyCustomerTotals([u64; MONTHS_PER_PERIOD]);

impl MonthlyCustomerTotals {
    pub fn from_table(table: &MetricTable) -> Self {
        let mut totals = [0u64; MONTHS_PER_PERIOD];
        for row in table.rows() {
            for (month, metric) in row.iter() {
                let total = &mut totals[month.slot()];
                *total = total.saturating_add(metric.customer_count);
            }
        }
        Self(totals)
    }

    pub fn get(&self, month: MonthIndex) -> u64 {
        self.0[month.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_index_accepts_only_half_year_range() {
        assert!(MonthIndex::new(0).is_none());
        assert!(MonthIndex::new(7).is_none());
        assert_eq!(MonthIndex::new(1).map(MonthIndex::get), Some(1));
        assert_eq!(MonthIndex::new(6).map(MonthIndex::get), Some(6));
        assert_eq!(MonthIndex::all().count(), MONTHS_PER_PERIOD);
    }

    #[test]
    fn customer_totals_sum_across_branches() {
        let mut first = BranchMonths::zeroed(Branch::new(1, "A"));
        let mut second = BranchMonths::zeroed(Branch::new(2, "B"));
        let march = MonthIndex::new(3).expect("valid month");
        first.month_mut(march).customer_count = 40;
        second.month_mut(march).customer_count = 60;

        let table = MetricTable::from_rows(vec![first, second]);
        let totals = MonthlyCustomerTotals::from_table(&table);
        assert_eq!(totals.get(march), 100);
        assert_eq!(totals.get(MonthIndex::new(1).expect("valid month")), 0);
    }

    #[test]
    fn customer_totals_saturate_instead_of_wrapping() {
        let mut first = BranchMonths::zeroed(Branch::new(1, "A"));
        let mut second = BranchMonths::zeroed(Branch::new(2, "B"));
        let january = MonthIndex::new(1).expect("valid month");
        first.month_mut(january).customer_count = u64::MAX;
        second.month_mut(january).customer_count = u64::MAX;

        let totals = MonthlyCustomerTotals::from_table(&MetricTable::from_rows(vec![first, second]));
        assert_eq!(totals.get(january), u64::MAX);
    }
}
