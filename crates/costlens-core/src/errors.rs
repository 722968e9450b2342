//! Error types for scenario evaluation and comparison.

use crate::model::{Band, Side};
use thiserror::Error;

/// Malformed scenario or catalog input. Caller-recoverable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Area must be finite and strictly positive.
    #[error("invalid area {area}: must be a finite number greater than zero")]
    InvalidArea { area: f64 },

    /// A catalog category has no selection.
    #[error("missing selection for category '{category_id}'")]
    MissingSelection { category_id: String },

    /// A category was selected more than once.
    #[error("duplicate selection for category '{category_id}'")]
    DuplicateSelection { category_id: String },

    /// A selection names a category the catalog does not contain.
    #[error("selection references unknown category '{category_id}'")]
    UnknownCategory { category_id: String },

    #[error("catalog must contain at least one category")]
    EmptyCatalog,

    #[error("catalog contains duplicate category id '{category_id}'")]
    DuplicateCategory { category_id: String },

    #[error("catalog category at position {position} has an empty id")]
    EmptyCategoryId { position: usize },
}

impl ValidationError {
    /// Category the error is about, when there is one.
    pub fn category_id(&self) -> Option<&str> {
        match self {
            Self::MissingSelection { category_id }
            | Self::DuplicateSelection { category_id }
            | Self::UnknownCategory { category_id }
            | Self::DuplicateCategory { category_id } => Some(category_id),
            Self::InvalidArea { .. } | Self::EmptyCatalog | Self::EmptyCategoryId { .. } => None,
        }
    }
}

/// Failure of a single scenario evaluation. Nothing partial is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluateError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Benchmark data has no rate for a required pair (stale or incomplete benchmark).
    #[error("missing benchmark rate for category '{category_id}' at band {band}")]
    MissingRate { category_id: String, band: Band },

    /// Benchmark yielded a negative or non-finite rate.
    #[error("invalid benchmark rate {rate} for category '{category_id}' at band {band}")]
    InvalidRate {
        category_id: String,
        band: Band,
        rate: f64,
    },

    #[error("cost for category '{category_id}' overflows ({area_units} units at rate {rate})")]
    CostOverflow {
        category_id: String,
        area_units: f64,
        rate: f64,
    },

    #[error("total cost overflows at {area_units} units")]
    TotalOverflow { area_units: f64 },
}

impl EvaluateError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when the benchmark data (not the scenario) is at fault.
    pub fn is_benchmark_gap(&self) -> bool {
        matches!(self, Self::MissingRate { .. } | Self::InvalidRate { .. })
    }
}

/// Compared results do not derive from the same catalog.
///
/// This is a precondition violation on the caller's side, not a user-facing condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    #[error("category mismatch: '{category_id}' is missing from scenario {missing_from}")]
    CategoryMismatch {
        category_id: String,
        missing_from: Side,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_offending_category() {
        let err = ValidationError::MissingSelection {
            category_id: "energy".into(),
        };
        assert_eq!(err.category_id(), Some("energy"));
        assert_eq!(err.to_string(), "missing selection for category 'energy'");

        let err = ValidationError::InvalidArea { area: -1.0 };
        assert_eq!(err.category_id(), None);
    }

    #[test]
    fn evaluate_error_classification() {
        let e: EvaluateError = ValidationError::EmptyCatalog.into();
        assert!(e.is_validation());
        assert!(!e.is_benchmark_gap());

        let e = EvaluateError::MissingRate {
            category_id: "water".into(),
            band: Band::High,
        };
        assert!(e.is_benchmark_gap());
        assert_eq!(
            e.to_string(),
            "missing benchmark rate for category 'water' at band high"
        );
    }
}
