use crate::summary::{Comparison, CustomerDistribution, Dashboard, MonthSnapshot};
use crate::types::report::ScoreReport;

pub fn score_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str("# Branch Health Report\n\n");

    for (title, result) in report.scenarios() {
        output.push_str(&format!("## {title}\n\n"));
        output.push_str(&format!(
            "Factors: inventory days x{}, net profit x{}\n\n",
            result.factors.inventory_day_factor, result.factors.net_profit_factor
        ));
        output.push_str("| Branch | Raw | Score | Status | Action |\n");
        output.push_str("|---|---:|---:|---|---|\n");
        for (index, name) in report.branch_names.iter().enumerate() {
            let label = result.labels[index];
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                name,
                result.raw_scores[index],
                result.scores[index],
                label,
                label.recommended_action()
            ));
        }
        output.push('\n');
    }

    output
}

pub fn summary_markdown(
    dashboard: &Dashboard,
    customers: &CustomerDistribution,
    snapshot: Option<&MonthSnapshot>,
) -> String {
    let mut output = String::new();
    output.push_str("# Branch Summary\n\n");
    output.push_str(&format!("Branches: {}\n\n", dashboard.branch_count));

    if let Some(most) = &dashboard.most_profitable {
        output.push_str(&format!(
            "- most profitable: {} ({} net profit)\n",
            most.branch.name, most.net_profit
        ));
    }
    if let Some(least) = &dashboard.least_profitable {
        output.push_str(&format!(
            "- least profitable: {} ({} net profit)\n",
            least.branch.name, least.net_profit
        ));
    }
    output.push('\n');

    output.push_str("## Period Totals\n\n");
    output.push_str("| Branch | Revenue | Net profit | Customers |\n");
    output.push_str("|---|---:|---:|---:|\n");
    for totals in &dashboard.branches {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            totals.branch.name, totals.revenue, totals.net_profit, totals.customers
        ));
    }
    output.push('\n');

    output.push_str("## Monthly Net Profit\n\n");
    for total in &dashboard.monthly_net_profit {
        output.push_str(&format!("- {}: {}\n", total.month, total.net_profit));
    }
    output.push('\n');

    match customers.month {
        Some(month) => output.push_str(&format!("## Customers ({month})\n\n")),
        None => output.push_str("## Customers (whole period)\n\n"),
    }
    if customers.total == 0 {
        output.push_str("- none\n");
    } else {
        for share in &customers.branches {
            output.push_str(&format!(
                "- {}: {} ({}%)\n",
                share.branch.name, share.customers, share.share_percent
            ));
        }
    }

    if let Some(snapshot) = snapshot {
        output.push_str(&format!("\n## Snapshot ({})\n\n", snapshot.month));
        output.push_str("| Branch | Revenue | Net profit | Customers | Inventory days |\n");
        output.push_str("|---|---:|---:|---:|---:|\n");
        for values in &snapshot.branches {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                values.branch.name,
                values.revenue,
                values.net_profit,
                values.customers,
                values.inventory_days
            ));
        }
    }

    output
}

pub fn comparison_markdown(comparison: &Comparison) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# {} vs {}: {}\n\n",
        comparison.first.name,
        comparison.second.name,
        comparison.metric.label()
    ));
    output.push_str(&format!(
        "| Month | {} | {} |\n",
        comparison.first.name, comparison.second.name
    ));
    output.push_str("|---|---:|---:|\n");
    for point in &comparison.points {
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            point.month, point.first, point.second
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::aggregate;
    use crate::engine::{EngineConfig, ScoringEngine};
    use crate::summary::{
        compare, customer_distribution, dashboard, month_snapshot, ComparedMetric,
    };
    use crate::types::metrics::{Branch, MonthIndex};
    use crate::types::records::PerformanceRecord;
    use rust_decimal_macros::dec;

    fn branches() -> Vec<Branch> {
        vec![Branch::new(1, "Gaziemir"), Branch::new(2, "Selcuk")]
    }

    fn performance() -> Vec<PerformanceRecord> {
        vec![PerformanceRecord {
            branch_id: 2,
            month: 1,
            revenue: dec!(600),
            net_profit: dec!(10),
            customer_count: 30,
        }]
    }

    #[test]
    fn markdown_report_contains_all_scenarios() {
        let engine = ScoringEngine::new(EngineConfig::new(branches()));
        let report = engine.score(&performance(), &[]).report;

        let rendered = score_markdown(&report);
        assert!(rendered.contains("# Branch Health Report"));
        assert!(rendered.contains("## Base"));
        assert!(rendered.contains("## Scenario A: inventory stress"));
        assert!(rendered.contains("## Scenario B: profit stress"));
        assert!(rendered.contains("| Selcuk | 10 | 12 | Top performer | Use as a model |"));
        assert!(rendered.contains("| Gaziemir | 0 | 0 | Good | Develop further |"));
    }

    #[test]
    fn markdown_summary_lists_customers_for_whole_period() {
        let table = aggregate(&branches(), &performance(), &[]).table;
        let rendered =
            summary_markdown(&dashboard(&table), &customer_distribution(&table, None), None);
        assert!(rendered.contains("Branches: 2"));
        assert!(rendered.contains("- most profitable: Selcuk"));
        assert!(rendered.contains("## Customers (whole period)"));
        assert!(rendered.contains("- Selcuk: 30 (100"));
        assert!(rendered.contains("- M1: 10"));
        assert!(!rendered.contains("## Snapshot"));
    }

    #[test]
    fn markdown_summary_adds_month_snapshot() {
        let table = aggregate(&branches(), &performance(), &[]).table;
        let january = MonthIndex::new(1).expect("valid month");
        let snapshot = month_snapshot(&table, january);
        let rendered = summary_markdown(
            &dashboard(&table),
            &customer_distribution(&table, Some(january)),
            Some(&snapshot),
        );
        assert!(rendered.contains("## Customers (M1)"));
        assert!(rendered.contains("## Snapshot (M1)"));
        assert!(rendered.contains("| Gaziemir | 0 | 0 | 0 | 0 |"));
        assert!(rendered.contains("| Selcuk | 600 | 10 | 30 | 0 |"));
    }

    #[test]
    fn markdown_comparison_has_six_rows() {
        let table = aggregate(&branches(), &performance(), &[]).table;
        let comparison =
            compare(&table, "Gaziemir", "Selcuk", ComparedMetric::Revenue).expect("branches exist");
        let rendered = comparison_markdown(&comparison);
        assert!(rendered.starts_with("# Gaziemir vs Selcuk: revenue (millions)"));
        assert!(rendered.contains("| M1 | 0 | 600 |"));
        assert_eq!(rendered.matches("| M").count(), 7);
    }
}
