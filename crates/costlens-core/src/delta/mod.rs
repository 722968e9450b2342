pub mod engine;

pub use engine::{compare, MAX_SUMMARY_ROWS, MAX_TOP_DRIVERS};

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 0.015;
pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
    Flat,
}

impl Direction {
    pub fn of(delta_cost: f64) -> Self {
        if delta_cost > 0.0 {
            Direction::Increase
        } else if delta_cost < 0.0 {
            Direction::Decrease
        } else {
            Direction::Flat
        }
    }
}

/// Magnitude class of a category's change, relative to the baseline total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heat {
    Low,
    Medium,
    High,
}

impl Heat {
    /// Threshold classification on impact alone (no driver upgrade).
    pub fn classify(impact_fraction: f64, medium_threshold: f64, high_threshold: f64) -> Self {
        if impact_fraction >= high_threshold {
            Heat::High
        } else if impact_fraction >= medium_threshold {
            Heat::Medium
        } else {
            Heat::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Heat::Low => "low",
            Heat::Medium => "medium",
            Heat::High => "high",
        }
    }
}

impl fmt::Display for Heat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Largest absolute change first; ties keep catalog order.
    #[default]
    Impact,
    /// Catalog order.
    Category,
}

/// Comparison knobs. Thresholds are fractions of scenario A's total (0.03 = 3%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub medium_threshold: f64,
    pub high_threshold: f64,
    pub sort_mode: SortMode,
    pub drivers_only: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            medium_threshold: DEFAULT_MEDIUM_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            sort_mode: SortMode::Impact,
            drivers_only: false,
        }
    }
}

impl CompareConfig {
    /// Negative or NaN thresholds become 0; `high_threshold` is raised to `medium_threshold`.
    pub fn clamped(&self) -> Self {
        let medium = non_negative(self.medium_threshold);
        let high = non_negative(self.high_threshold).max(medium);
        Self {
            medium_threshold: medium,
            high_threshold: high,
            ..*self
        }
    }
}

/// Partial [`CompareConfig`]: only the fields that are set replace the base values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_mode: Option<SortMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivers_only: Option<bool>,
}

impl CompareOverrides {
    pub fn apply_to(&self, base: CompareConfig) -> CompareConfig {
        CompareConfig {
            medium_threshold: self.medium_threshold.unwrap_or(base.medium_threshold),
            high_threshold: self.high_threshold.unwrap_or(base.high_threshold),
            sort_mode: self.sort_mode.unwrap_or(base.sort_mode),
            drivers_only: self.drivers_only.unwrap_or(base.drivers_only),
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 {
        0.0
    } else {
        v
    }
}

/// Per-category comparison record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaRow {
    pub category_id: String,
    pub label: String,
    /// Index of the category in scenario A's result. Evaluator output is in catalog order, so
    /// this equals `Category::order` for results produced by `ScenarioEvaluator`.
    pub catalog_order: usize,
    pub cost_a: f64,
    pub cost_b: f64,
    pub delta_cost: f64,
    pub pct_a: f64,
    pub pct_b: f64,
    pub delta_pct: f64,
    pub impact_fraction: f64,
    pub direction: Direction,
    pub heat: Heat,
    pub is_top_driver: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub total_delta: f64,
    pub rows: Vec<DeltaRow>,
    pub top_increases: Vec<DeltaRow>,
    pub top_decreases: Vec<DeltaRow>,
    pub currency: String,
    pub total_a: f64,
    pub total_b: f64,
}

impl DeltaReport {
    pub fn drivers(&self) -> impl Iterator<Item = &DeltaRow> {
        self.rows.iter().filter(|r| r.is_top_driver)
    }

    pub fn row(&self, category_id: &str) -> Option<&DeltaRow> {
        self.rows.iter().find(|r| r.category_id == category_id)
    }

    /// True when no category changed cost.
    pub fn is_flat(&self) -> bool {
        self.rows.iter().all(|r| r.direction == Direction::Flat)
    }
}
