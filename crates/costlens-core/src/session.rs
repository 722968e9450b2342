//! Recompute-on-change host around the engine.
//!
//! A [`Session`] owns a narrowed [`Workspace`]. Mutators only change inputs; [`Session::view`]
//! re-runs the evaluator for both scenarios and, when comparing, the delta analyzer. Nothing is
//! cached between views.

use crate::benchmark::RateLookup;
use crate::delta::{compare, CompareConfig, DeltaReport};
use crate::errors::CompareError;
use crate::evaluate::ScenarioEvaluator;
use crate::input::{ScenarioInput, Workspace};
use crate::model::{Band, ScenarioResult, Side};
use serde::Serialize;
use thiserror::Error;

/// Error boundary around one evaluation: exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub result: Option<ScenarioResult>,
    pub error: Option<String>,
}

impl ScenarioOutcome {
    pub fn ok(result: ScenarioResult) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }
}

/// Evaluate one scenario, converting any failure into a message instead of propagating it.
pub fn evaluate_guarded<B>(
    evaluator: &ScenarioEvaluator<'_>,
    scenario: &ScenarioInput,
    benchmark: &B,
) -> ScenarioOutcome
where
    B: RateLookup + ?Sized,
{
    match evaluator.evaluate(scenario.area_units, benchmark, &scenario.selections) {
        Ok(result) => ScenarioOutcome::ok(result),
        Err(e) => {
            tracing::warn!(
                region = %scenario.region,
                tier = %scenario.tier,
                error = %e,
                "scenario evaluation failed"
            );
            ScenarioOutcome::failed(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub a: ScenarioOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<ScenarioOutcome>,
    /// Present only when comparing and both scenarios evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<DeltaReport>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("scenario {side} is not configured")]
    NoScenario { side: Side },

    #[error("unknown category '{category_id}'")]
    UnknownCategory { category_id: String },

    #[error("no benchmark for region '{region}' tier '{tier}'")]
    UnknownBenchmark { region: String, tier: String },

    /// Results from different catalogs reached the analyzer. Indicates a host bug.
    #[error(transparent)]
    Compare(#[from] CompareError),
}

#[derive(Debug, Clone)]
pub struct Session {
    workspace: Workspace,
    comparing: bool,
}

impl Session {
    /// Comparison starts enabled when the workspace defines scenario B.
    pub fn new(workspace: Workspace) -> Self {
        let comparing = workspace.b.is_some();
        Self {
            workspace,
            comparing,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn is_comparing(&self) -> bool {
        self.comparing
    }

    pub fn compare_config(&self) -> &CompareConfig {
        &self.workspace.compare
    }

    /// Area is stored as given; an invalid value shows up as an evaluation error in the view.
    pub fn set_area(&mut self, side: Side, area_units: f64) -> Result<(), SessionError> {
        self.scenario_mut(side)?.area_units = area_units;
        Ok(())
    }

    pub fn set_band(
        &mut self,
        side: Side,
        category_id: &str,
        band: Band,
    ) -> Result<(), SessionError> {
        let scenario = self.scenario_mut(side)?;
        let selection = scenario
            .selections
            .iter_mut()
            .find(|s| s.category_id == category_id)
            .ok_or_else(|| SessionError::UnknownCategory {
                category_id: category_id.to_string(),
            })?;
        selection.band = band;
        Ok(())
    }

    pub fn set_benchmark(
        &mut self,
        side: Side,
        region: &str,
        tier: &str,
    ) -> Result<(), SessionError> {
        if self.workspace.library.get(region, tier).is_none() {
            return Err(SessionError::UnknownBenchmark {
                region: region.to_string(),
                tier: tier.to_string(),
            });
        }
        let scenario = self.scenario_mut(side)?;
        scenario.region = region.to_string();
        scenario.tier = tier.to_string();
        Ok(())
    }

    pub fn set_compare_config(&mut self, config: CompareConfig) {
        self.workspace.compare = config;
    }

    /// Turning comparison on without a scenario B seeds B from a copy of A.
    pub fn enable_comparison(&mut self, on: bool) {
        if on && self.workspace.b.is_none() {
            self.workspace.b = Some(self.workspace.a.clone());
        }
        self.comparing = on;
    }

    pub fn evaluate(&self, side: Side) -> Result<ScenarioOutcome, SessionError> {
        let scenario = self
            .workspace
            .scenario(side)
            .ok_or(SessionError::NoScenario { side })?;
        let evaluator = ScenarioEvaluator::new(&self.workspace.catalog);

        Ok(match self.workspace.benchmark_for(side) {
            Some(benchmark) => evaluate_guarded(&evaluator, scenario, benchmark),
            None => ScenarioOutcome::failed(format!(
                "no benchmark for region '{}' tier '{}'",
                scenario.region, scenario.tier
            )),
        })
    }

    /// Recompute everything from the current inputs.
    pub fn view(&self) -> Result<SessionView, SessionError> {
        let a = self.evaluate(Side::A)?;
        if !self.comparing {
            return Ok(SessionView {
                a,
                b: None,
                delta: None,
            });
        }

        let b = self.evaluate(Side::B)?;
        let delta = match (&a.result, &b.result) {
            (Some(ra), Some(rb)) => Some(compare(ra, rb, &self.workspace.compare)?),
            _ => None,
        };

        Ok(SessionView {
            a,
            b: Some(b),
            delta,
        })
    }

    fn scenario_mut(&mut self, side: Side) -> Result<&mut ScenarioInput, SessionError> {
        self.workspace
            .scenario_mut(side)
            .ok_or(SessionError::NoScenario { side })
    }
}
