use crate::error::HealthError;
use crate::types::metrics::Branch;
use crate::types::report::ScenarioFactors;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashSet;

pub const DEFAULT_PERFORMANCE_FILE: &str = "performance.csv";
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.csv";
pub const DEFAULT_INVENTORY_STRESS: Decimal = dec!(1.25);
pub const DEFAULT_PROFIT_STRESS: Decimal = dec!(0.8);

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    pub project: ProjectConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub branches: Vec<Branch>,
    pub scenarios: Option<ScenariosConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub fiscal_year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_performance_file")]
    pub performance: String,
    #[serde(default = "default_inventory_file")]
    pub inventory: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            performance: default_performance_file(),
            inventory: default_inventory_file(),
        }
    }
}

fn default_performance_file() -> String {
    DEFAULT_PERFORMANCE_FILE.to_string()
}

fn default_inventory_file() -> String {
    DEFAULT_INVENTORY_FILE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenariosConfig {
    pub inventory_stress: Option<Decimal>,
    pub profit_stress: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioSet {
    pub inventory_stress: ScenarioFactors,
    pub profit_stress: ScenarioFactors,
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self {
            inventory_stress: ScenarioFactors::inventory_stress(DEFAULT_INVENTORY_STRESS),
            profit_stress: ScenarioFactors::profit_stress(DEFAULT_PROFIT_STRESS),
        }
    }
}

impl HealthConfig {
    pub fn scenario_set(&self) -> ScenarioSet {
        let defaults = ScenarioSet::default();
        match &self.scenarios {
            Some(scenarios) => ScenarioSet {
                inventory_stress: scenarios
                    .inventory_stress
                    .map(ScenarioFactors::inventory_stress)
                    .unwrap_or(defaults.inventory_stress),
                profit_stress: scenarios
                    .profit_stress
                    .map(ScenarioFactors::profit_stress)
                    .unwrap_or(defaults.profit_stress),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), HealthError> {
        if self.project.name.trim().is_empty() {
            return Err(HealthError::ConfigParse(
                "project.name must not be empty".to_string(),
            ));
        }

        if let Some(year) = self.project.fiscal_year {
            if year <= 0 {
                return Err(HealthError::ConfigParse(format!(
                    "project.fiscal_year must be positive (found {year})"
                )));
            }
        }

        if self.branches.is_empty() {
            return Err(HealthError::ConfigParse(
                "at least one [[branches]] entry is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for branch in &self.branches {
            if branch.name.trim().is_empty() {
                return Err(HealthError::ConfigParse(format!(
                    "branch {} must have a non-empty name",
                    branch.id
                )));
            }
            if !seen.insert(branch.id) {
                return Err(HealthError::ConfigParse(format!(
                    "duplicate branch id: {}",
                    branch.id
                )));
            }
        }

        if let Some(scenarios) = &self.scenarios {
            for (key, value) in [
                ("inventory_stress", scenarios.inventory_stress),
                ("profit_stress", scenarios.profit_stress),
            ] {
                if let Some(factor) = value {
                    if factor <= Decimal::ZERO {
                        return Err(HealthError::ConfigParse(format!(
                            "scenarios.{key} must be greater than 0 (found {factor})"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRANCHES: &str = r#"
[[branches]]
id = 1
name = "Gaziemir"

[[branches]]
id = 2
name = "Bayrakli"
"#;

    fn parse(body: &str) -> HealthConfig {
        toml::from_str(body).expect("config should parse")
    }

    #[test]
    fn parse_minimal_config_uses_defaults() {
        let cfg = parse(&format!("[project]\nname = \"retail\"\n{BRANCHES}"));
        assert_eq!(cfg.project.name, "retail");
        assert_eq!(cfg.project.fiscal_year, None);
        assert_eq!(cfg.data.performance, DEFAULT_PERFORMANCE_FILE);
        assert_eq!(cfg.data.inventory, DEFAULT_INVENTORY_FILE);
        assert_eq!(cfg.branches.len(), 2);
        assert_eq!(cfg.branches[1], Branch::new(2, "Bayrakli"));
        assert_eq!(cfg.scenario_set(), ScenarioSet::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn scenario_overrides_replace_defaults() {
        let cfg = parse(&format!(
            r#"
[project]
name = "retail"
fiscal_year = 2025

[scenarios]
inventory_stress = 1.5
{BRANCHES}"#
        ));
        let set = cfg.scenario_set();
        assert_eq!(set.inventory_stress.inventory_day_factor, dec!(1.5));
        assert_eq!(set.inventory_stress.net_profit_factor, Decimal::ONE);
        assert_eq!(set.profit_stress.net_profit_factor, dec!(0.8));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_branches() {
        let cfg = parse("[project]\nname = \"retail\"\n");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("[[branches]]"));
    }

    #[test]
    fn validate_rejects_duplicate_branch_ids() {
        let cfg = parse(
            r#"
[project]
name = "retail"

[[branches]]
id = 3
name = "Karsiyaka"

[[branches]]
id = 3
name = "Urla"
"#,
        );
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("duplicate branch id: 3"));
    }

    #[test]
    fn validate_rejects_non_positive_factor() {
        let cfg = parse(&format!(
            "[project]\nname = \"retail\"\n\n[scenarios]\nprofit_stress = 0\n{BRANCHES}"
        ));
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("scenarios.profit_stress"));
    }

    #[test]
    fn validate_rejects_non_positive_fiscal_year() {
        let cfg = parse(&format!(
            "[project]\nname = \"retail\"\nfiscal_year = 0\n{BRANCHES}"
        ));
        assert!(cfg.validate().is_err());
    }
}
