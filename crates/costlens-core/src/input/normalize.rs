use super::{InputError, ScenarioDocument, WorkspaceDocument, SUPPORTED_WORKSPACE_VERSION};
use crate::benchmark::{BenchmarkLibrary, BenchmarkSet};
use crate::catalog::Catalog;
use crate::config::Settings;
use crate::delta::CompareConfig;
use crate::model::{Band, Selection, Side};
use std::collections::BTreeMap;

/// Narrowed, engine-ready workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub catalog: Catalog,
    pub library: BenchmarkLibrary,
    pub a: ScenarioInput,
    pub b: Option<ScenarioInput>,
    pub compare: CompareConfig,
}

impl Workspace {
    pub fn scenario(&self, side: Side) -> Option<&ScenarioInput> {
        match side {
            Side::A => Some(&self.a),
            Side::B => self.b.as_ref(),
        }
    }

    pub fn scenario_mut(&mut self, side: Side) -> Option<&mut ScenarioInput> {
        match side {
            Side::A => Some(&mut self.a),
            Side::B => self.b.as_mut(),
        }
    }

    /// Benchmark set the scenario on `side` points at.
    pub fn benchmark_for(&self, side: Side) -> Option<&BenchmarkSet> {
        let s = self.scenario(side)?;
        self.library.get(&s.region, &s.tier)
    }
}

/// One scenario with exactly one selection per catalog category, in catalog order.
///
/// `area_units` is carried as given; the evaluator validates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInput {
    pub region: String,
    pub tier: String,
    pub area_units: f64,
    pub selections: Vec<Selection>,
}

impl ScenarioInput {
    pub fn band_of(&self, category_id: &str) -> Option<Band> {
        self.selections
            .iter()
            .find(|s| s.category_id == category_id)
            .map(|s| s.band)
    }
}

pub fn narrow(doc: WorkspaceDocument, settings: &Settings) -> Result<Workspace, InputError> {
    if doc.version != SUPPORTED_WORKSPACE_VERSION {
        return Err(InputError::UnsupportedVersion { found: doc.version });
    }

    let catalog = Catalog::new(doc.catalog.into_iter().map(|e| (e.id, e.label)))?;
    let library = BenchmarkLibrary::from_sets(doc.benchmarks)
        .map_err(|(region, tier)| InputError::DuplicateBenchmark { region, tier })?;

    let a = narrow_scenario(Side::A, doc.scenarios.a, &catalog, &library, settings)?;
    let b = doc
        .scenarios
        .b
        .map(|b| narrow_scenario(Side::B, b, &catalog, &library, settings))
        .transpose()?;

    Ok(Workspace {
        catalog,
        library,
        a,
        b,
        compare: doc
            .compare
            .map_or(settings.compare, |o| o.apply_to(settings.compare)),
    })
}

fn narrow_scenario(
    side: Side,
    doc: ScenarioDocument,
    catalog: &Catalog,
    library: &BenchmarkLibrary,
    settings: &Settings,
) -> Result<ScenarioInput, InputError> {
    if library.get(&doc.region, &doc.tier).is_none() {
        return Err(InputError::UnknownBenchmark {
            side,
            region: doc.region,
            tier: doc.tier,
        });
    }

    let selections = normalize_selections(side, catalog, &doc.selections, settings.fallback_band)?;

    Ok(ScenarioInput {
        region: doc.region,
        tier: doc.tier,
        area_units: doc.area_units.unwrap_or(settings.default_area_units),
        selections,
    })
}

/// Produce exactly one selection per catalog category, in catalog order.
///
/// Unknown category ids are dropped with a warning and unselected categories get `fallback`.
/// A band string that is not low/medium/high is an error.
pub fn normalize_selections(
    side: Side,
    catalog: &Catalog,
    raw: &BTreeMap<String, String>,
    fallback: Band,
) -> Result<Vec<Selection>, InputError> {
    for id in raw.keys().filter(|id| !catalog.contains(id)) {
        tracing::warn!(%side, category = %id, "dropping selection for unknown category");
    }

    catalog
        .iter()
        .map(|category| -> Result<Selection, InputError> {
            let band = match raw.get(&category.id) {
                Some(value) => value.parse::<Band>().map_err(|_| InputError::InvalidBand {
                    side,
                    category_id: category.id.clone(),
                    value: value.clone(),
                })?,
                None => {
                    tracing::debug!(
                        %side,
                        category = %category.id,
                        band = %fallback,
                        "no selection; using fallback band"
                    );
                    fallback
                }
            };
            Ok(Selection::new(category.id.clone(), band))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new([("energy", "Energy"), ("water", "Water"), ("waste", "Waste")]).unwrap()
    }

    #[test]
    fn fills_missing_and_drops_unknown() {
        let raw: BTreeMap<String, String> = [
            ("water".to_string(), "HIGH".to_string()),
            ("parking".to_string(), "low".to_string()),
        ]
        .into_iter()
        .collect();

        let sels = normalize_selections(Side::A, &catalog(), &raw, Band::Medium).unwrap();
        assert_eq!(
            sels,
            vec![
                Selection::new("energy", Band::Medium),
                Selection::new("water", Band::High),
                Selection::new("waste", Band::Medium),
            ]
        );
    }

    #[test]
    fn invalid_band_names_side_and_category() {
        let raw: BTreeMap<String, String> =
            [("waste".to_string(), "severe".to_string())].into_iter().collect();
        let err = normalize_selections(Side::B, &catalog(), &raw, Band::Low).unwrap_err();
        match err {
            InputError::InvalidBand {
                side,
                category_id,
                value,
            } => {
                assert_eq!(side, Side::B);
                assert_eq!(category_id, "waste");
                assert_eq!(value, "severe");
            }
            other => panic!("expected InvalidBand, got {other:?}"),
        }
    }
}
