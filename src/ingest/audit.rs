use super::Dataset;
use crate::types::metrics::{Branch, MonthIndex};
use crate::types::report::Finding;
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub fn audit(branches: &[Branch], dataset: &Dataset) -> Vec<Finding> {
    let known: HashSet<u32> = branches.iter().map(|branch| branch.id).collect();
    let performance_keys: Vec<(u32, u8)> = dataset
        .performance
        .iter()
        .map(|record| (record.branch_id, record.month))
        .collect();
    let inventory_keys: Vec<(u32, u8)> = dataset
        .inventory
        .iter()
        .map(|record| (record.branch_id, record.month))
        .collect();

    let mut findings = Vec::new();

    let mut unknown = BTreeMap::<u32, usize>::new();
    for (branch_id, _) in performance_keys.iter().chain(inventory_keys.iter()) {
        if !known.contains(branch_id) {
            *unknown.entry(*branch_id).or_default() += 1;
        }
    }
    if !unknown.is_empty() {
        let detail = unknown
            .iter()
            .map(|(id, count)| format!("{id} ({count} rows)"))
            .collect::<Vec<_>>()
            .join(", ");
        findings.push(Finding::new(
            "data.unknown_branch",
            "Records reference unknown branches",
            format!("These branch ids are not configured and will be ignored: {detail}."),
        ));
    }

    let out_of_range = performance_keys
        .iter()
        .chain(inventory_keys.iter())
        .filter(|(branch_id, month)| known.contains(branch_id) && MonthIndex::new(*month).is_none())
        .count();
    if out_of_range > 0 {
        findings.push(Finding::new(
            "data.month_out_of_range",
            "Records outside the half-year",
            format!(
                "{out_of_range} row(s) use a month outside {}..={} and will be ignored.",
                MonthIndex::FIRST,
                MonthIndex::LAST
            ),
        ));
    }

    if !dataset.coerced.is_empty() {
        let detail = dataset
            .coerced
            .iter()
            .map(|field| format!("{}:{} {}={:?}", field.file, field.line, field.column, field.value))
            .collect::<Vec<_>>()
            .join(", ");
        findings.push(Finding::new(
            "data.non_numeric",
            "Non-numeric values read as zero",
            detail,
        ));
    }

    for (stream, keys) in [
        ("performance", &performance_keys),
        ("inventory", &inventory_keys),
    ] {
        let duplicates = duplicate_keys(keys, &known);
        if !duplicates.is_empty() {
            let detail = duplicates
                .iter()
                .map(|(branch_id, month)| format!("branch {branch_id} month {month}"))
                .collect::<Vec<_>>()
                .join(", ");
            let mut body = format!("Only the last {stream} row is used for: {detail}.");
            if stream == "performance" {
                body.push_str(
                    " Monthly customer totals count that row only, not the sum of all duplicates.",
                );
            }
            findings.push(Finding::new(
                &format!("data.duplicate_{stream}"),
                "Duplicate branch/month rows",
                body,
            ));
        }
    }

    findings
}

fn duplicate_keys(keys: &[(u32, u8)], known: &HashSet<u32>) -> BTreeSet<(u32, u8)> {
    let mut seen = HashSet::new();
    keys.iter()
        .filter(|(branch_id, month)| known.contains(branch_id) && MonthIndex::new(*month).is_some())
        .filter(|key| !seen.insert(**key))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::CoercedField;
    use crate::types::records::{InventoryRecord, PerformanceRecord};

    fn branches() -> Vec<Branch> {
        vec![Branch::new(1, "Gaziemir"), Branch::new(2, "Bayrakli")]
    }

    fn perf(branch_id: u32, month: u8) -> PerformanceRecord {
        PerformanceRecord {
            branch_id,
            month,
            ..PerformanceRecord::default()
        }
    }

    #[test]
    fn clean_dataset_has_no_findings() {
        let dataset = Dataset {
            performance: vec![perf(1, 1), perf(2, 1)],
            inventory: vec![InventoryRecord {
                branch_id: 1,
                month: 1,
                ..InventoryRecord::default()
            }],
            ..Dataset::default()
        };
        assert!(audit(&branches(), &dataset).is_empty());
    }

    #[test]
    fn reports_unknown_branches_with_counts() {
        let dataset = Dataset {
            performance: vec![perf(7, 1), perf(7, 2), perf(1, 1)],
            inventory: vec![InventoryRecord {
                branch_id: 9,
                month: 1,
                ..InventoryRecord::default()
            }],
            ..Dataset::default()
        };
        let findings = audit(&branches(), &dataset);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "data.unknown_branch");
        assert!(findings[0].body.contains("7 (2 rows)"));
        assert!(findings[0].body.contains("9 (1 rows)"));
    }

    #[test]
    fn reports_months_duplicates_and_coercions() {
        let dataset = Dataset {
            performance: vec![perf(1, 0), perf(2, 4), perf(2, 4)],
            coerced: vec![CoercedField {
                file: "performance.csv".to_string(),
                line: 3,
                column: "revenue_million",
                value: "abc".to_string(),
            }],
            ..Dataset::default()
        };
        let findings = audit(&branches(), &dataset);
        let duplicate = findings
            .iter()
            .find(|finding| finding.id == "data.duplicate_performance")
            .expect("duplicate finding present");
        assert!(duplicate.body.contains("branch 2 month 4"));
        assert!(duplicate.body.contains("customer totals count that row only"));

        let ids: Vec<String> = findings.into_iter().map(|finding| finding.id).collect();
        assert_eq!(
            ids,
            vec![
                "data.month_out_of_range",
                "data.non_numeric",
                "data.duplicate_performance",
            ]
        );
    }
}
