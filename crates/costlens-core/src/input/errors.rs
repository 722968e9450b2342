use super::SUPPORTED_WORKSPACE_VERSION;
use crate::errors::ValidationError;
use crate::model::Side;
use thiserror::Error;

/// Workspace document could not be narrowed into engine inputs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read workspace {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse workspace {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported workspace version {found} (supported: {SUPPORTED_WORKSPACE_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("invalid catalog: {0}")]
    Catalog(#[from] ValidationError),

    #[error("benchmark library lists region '{region}' tier '{tier}' more than once")]
    DuplicateBenchmark { region: String, tier: String },

    #[error("scenario {side}: no benchmark for region '{region}' tier '{tier}'")]
    UnknownBenchmark {
        side: Side,
        region: String,
        tier: String,
    },

    #[error("scenario {side}: invalid band '{value}' for category '{category_id}'")]
    InvalidBand {
        side: Side,
        category_id: String,
        value: String,
    },
}

impl InputError {
    /// Scenario the error belongs to, when it is scenario-specific.
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::UnknownBenchmark { side, .. } | Self::InvalidBand { side, .. } => Some(*side),
            _ => None,
        }
    }
}
