use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

pub type RawScore = u32;
pub type NormalizedScore = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusLabel {
    #[serde(rename = "Top performer")]
    TopPerformer,
    Good,
    Watch,
    Critical,
}

impl StatusLabel {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0 => Self::TopPerformer,
            1 => Self::Good,
            2 => Self::Watch,
            _ => Self::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopPerformer => "Top performer",
            Self::Good => "Good",
            Self::Watch => "Watch",
            Self::Critical => "Critical",
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            Self::TopPerformer => "Use as a model",
            Self::Good => "Develop further",
            Self::Watch => "Improve operations",
            Self::Critical => "Consider closing",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioFactors {
    pub inventory_day_factor: Decimal,
    pub net_profit_factor: Decimal,
}

impl ScenarioFactors {
    pub const BASE: Self = Self {
        inventory_day_factor: Decimal::ONE,
        net_profit_factor: Decimal::ONE,
    };

    pub fn inventory_stress(factor: Decimal) -> Self {
        Self {
            inventory_day_factor: factor,
            ..Self::BASE
        }
    }

    pub fn profit_stress(factor: Decimal) -> Self {
        Self {
            net_profit_factor: factor,
            ..Self::BASE
        }
    }
}

impl Default for ScenarioFactors {
    fn default() -> Self {
        Self::BASE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioResult {
    pub factors: ScenarioFactors,
    pub raw_scores: Vec<RawScore>,
    pub scores: Vec<NormalizedScore>,
    pub labels: Vec<StatusLabel>,
}

impl ScenarioResult {
    pub fn top_performer(&self) -> Option<usize> {
        self.labels
            .iter()
            .position(|label| *label == StatusLabel::TopPerformer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub branch_names: Vec<String>,
    pub base: ScenarioResult,
    pub scenario_a: ScenarioResult,
    pub scenario_b: ScenarioResult,
}

impl ScoreReport {
    pub fn scenarios(&self) -> [(&'static str, &ScenarioResult); 3] {
        [
            ("Base", &self.base),
            ("Scenario A: inventory stress", &self.scenario_a),
            ("Scenario B: profit stress", &self.scenario_b),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl Finding {
    pub fn new(id: &str, title: &str, body: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.into(),
        }
    }
}
