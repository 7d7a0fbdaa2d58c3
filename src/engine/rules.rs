use crate::types::metrics::{BranchMonths, MonthlyCustomerTotals, MonthlyMetric, MONTHS_PER_PERIOD};
use crate::types::report::{RawScore, ScenarioFactors};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const REVENUE_FLOOR: Decimal = dec!(200);
const REVENUE_BONUS: Decimal = dec!(500);
const PROFIT_BONUS: Decimal = dec!(50);
const SHARE_FLOOR: Decimal = dec!(10);
const SHARE_BONUS: Decimal = dec!(25);
const INVENTORY_CEILING: Decimal = dec!(60);
const INVENTORY_BONUS: Decimal = dec!(45);

pub const MAX_REVENUE_POINTS: u32 = 3;
pub const MAX_PROFIT_POINTS: u32 = 5;
pub const MAX_SHARE_POINTS: u32 = 3;
pub const MAX_INVENTORY_POINTS: u32 = 3;

/// Best possible month. Moves with any threshold or point change above.
pub const MAX_MONTH_POINTS: u32 =
    MAX_REVENUE_POINTS + MAX_PROFIT_POINTS + MAX_SHARE_POINTS + MAX_INVENTORY_POINTS;

pub const MAX_RAW_SCORE: RawScore = MAX_MONTH_POINTS * MONTHS_PER_PERIOD as u32;

pub fn revenue_points(revenue: Decimal) -> u32 {
    if revenue > REVENUE_BONUS {
        3
    } else if revenue > REVENUE_FLOOR {
        2
    } else {
        0
    }
}

pub fn profit_points(effective_profit: Decimal) -> u32 {
    if effective_profit > PROFIT_BONUS {
        5
    } else if effective_profit > Decimal::ZERO {
        4
    } else {
        0
    }
}

/// Percentage of the month's customers served by one branch; zero when nobody visited.
pub fn customer_share(customer_count: u64, monthly_total: u64) -> Decimal {
    if monthly_total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(customer_count) * Decimal::ONE_HUNDRED / Decimal::from(monthly_total)
}

pub fn share_points(share: Decimal) -> u32 {
    if share >= SHARE_BONUS {
        3
    } else if share >= SHARE_FLOOR {
        2
    } else {
        0
    }
}

// Zero or negative days mean no data, not instant turnover.
pub fn inventory_points(effective_days: Decimal) -> u32 {
    if effective_days <= Decimal::ZERO {
        0
    } else if effective_days < INVENTORY_BONUS {
        3
    } else if effective_days < INVENTORY_CEILING {
        2
    } else {
        0
    }
}

// Saturates so oversized cells land past every threshold instead of overflowing.
pub fn month_points(metric: &MonthlyMetric, monthly_total: u64, factors: &ScenarioFactors) -> u32 {
    let effective_profit = metric.net_profit.saturating_mul(factors.net_profit_factor);
    let effective_days = metric.inventory_days.saturating_mul(factors.inventory_day_factor);
    let share = customer_share(metric.customer_count, monthly_total);

    revenue_points(metric.revenue)
        + profit_points(effective_profit)
        + share_points(share)
        + inventory_points(effective_days)
}

pub fn evaluate(
    branch: &BranchMonths,
    customer_totals: &MonthlyCustomerTotals,
    factors: &ScenarioFactors,
) -> RawScore {
    branch
        .iter()
        .map(|(month, metric)| month_points(metric, customer_totals.get(month), factors))
        .sum()
}
