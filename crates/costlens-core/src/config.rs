//! Host settings: defaults the caller passes into the engine by value.

use crate::delta::CompareConfig;
use crate::model::Band;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const SUPPORTED_SETTINGS_VERSION: u32 = 1;
pub const DEFAULT_AREA_UNITS: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    /// Area applied to scenarios that do not state one.
    pub default_area_units: f64,
    /// Band filled in for catalog categories that have no selection.
    pub fallback_band: Band,
    pub compare: CompareConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SUPPORTED_SETTINGS_VERSION,
            default_area_units: DEFAULT_AREA_UNITS,
            fallback_band: Band::Medium,
            compare: CompareConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported settings version {found} (supported: {SUPPORTED_SETTINGS_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("invalid default_area_units {value}: must be a finite number greater than zero")]
    InvalidDefaultArea { value: f64 },
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let origin = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: origin.clone(),
        source,
    })?;
    parse_settings(&raw, &origin)
}

/// Parse settings YAML. An empty document yields the defaults.
pub fn parse_settings(raw: &str, origin: &str) -> Result<Settings, SettingsError> {
    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings =
        from_yaml_warn_unknown(raw, origin).map_err(|source| SettingsError::Parse {
            path: origin.to_string(),
            source,
        })?;

    if settings.version != SUPPORTED_SETTINGS_VERSION {
        return Err(SettingsError::UnsupportedVersion {
            found: settings.version,
        });
    }
    if !(settings.default_area_units.is_finite() && settings.default_area_units > 0.0) {
        return Err(SettingsError::InvalidDefaultArea {
            value: settings.default_area_units,
        });
    }
    Ok(settings)
}

/// Deserialize YAML (or JSON), logging unknown keys instead of rejecting them.
pub(crate) fn from_yaml_warn_unknown<T: DeserializeOwned>(
    raw: &str,
    origin: &str,
) -> Result<T, serde_yaml::Error> {
    let de = serde_yaml::Deserializer::from_str(raw);
    serde_ignored::deserialize(de, |path| {
        tracing::warn!(source = origin, key = %path, "ignoring unknown key");
    })
}
