//! Workspace documents and their narrowing into engine inputs.
//!
//! A workspace is loosely-typed external state (YAML or JSON): catalog, benchmark library,
//! scenario selections and optional comparison overrides. [`narrow`] turns it into a
//! [`Workspace`] whose scenarios always carry exactly one selection per catalog category, or
//! fails with an [`InputError`]. The engine itself never sees the raw document.

pub mod errors;
pub mod normalize;

pub use errors::InputError;
pub use normalize::{narrow, normalize_selections, ScenarioInput, Workspace};

use crate::benchmark::BenchmarkSet;
use crate::config::{from_yaml_warn_unknown, Settings};
use crate::delta::CompareOverrides;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const SUPPORTED_WORKSPACE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkSet>,
    pub scenarios: ScenarioPair,
    /// Keys set here replace the corresponding `Settings.compare` values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare: Option<CompareOverrides>,
}

fn default_version() -> u32 {
    SUPPORTED_WORKSPACE_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPair {
    pub a: ScenarioDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<ScenarioDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDocument {
    pub region: String,
    pub tier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_units: Option<f64>,
    /// Category id -> band name. Band names are case-insensitive.
    #[serde(default)]
    pub selections: BTreeMap<String, String>,
}

pub fn load_workspace(path: &Path, settings: &Settings) -> Result<Workspace, InputError> {
    let origin = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: origin.clone(),
        source,
    })?;
    parse_workspace(&raw, &origin, settings)
}

pub fn parse_workspace(
    raw: &str,
    origin: &str,
    settings: &Settings,
) -> Result<Workspace, InputError> {
    let doc: WorkspaceDocument =
        from_yaml_warn_unknown(raw, origin).map_err(|source| InputError::Parse {
            path: origin.to_string(),
            source,
        })?;
    narrow(doc, settings)
}
