use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity selector applied per category. Drives which benchmark rate is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Medium, Band::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown band '{0}' (expected low, medium or high)")]
pub struct UnknownBand(pub String);

impl FromStr for Band {
    type Err = UnknownBand;

    /// Case-insensitive: `LOW`, `Low` and `low` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Band::Low),
            "medium" => Ok(Band::Medium),
            "high" => Ok(Band::High),
            _ => Err(UnknownBand(s.to_string())),
        }
    }
}

/// One of the two scenarios in a comparison. `A` is the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// One `(category, band)` choice within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub category_id: String,
    pub band: Band,
}

impl Selection {
    pub fn new(category_id: impl Into<String>, band: Band) -> Self {
        Self {
            category_id: category_id.into(),
            band,
        }
    }
}

/// Cost breakdown for a single scenario.
///
/// `categories` holds exactly one entry per catalog category, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub total_cost: f64,
    pub currency: String,
    pub categories: Vec<CategoryCost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCost {
    pub category_id: String,
    pub label: String,
    pub cost: f64,
    /// Share of `total_cost` in `[0, 1]`; zero for every row when the total is zero.
    pub pct_of_total: f64,
}

impl ScenarioResult {
    pub fn category(&self, category_id: &str) -> Option<&CategoryCost> {
        self.categories
            .iter()
            .find(|c| c.category_id == category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_parses_case_insensitively() {
        assert_eq!("LOW".parse::<Band>().unwrap(), Band::Low);
        assert_eq!("Medium".parse::<Band>().unwrap(), Band::Medium);
        assert_eq!(" high ".parse::<Band>().unwrap(), Band::High);
        let err = "extreme".parse::<Band>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown band 'extreme' (expected low, medium or high)"
        );
    }

    #[test]
    fn band_serializes_lowercase() {
        let json = serde_json::to_string(&Band::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
