use crate::benchmark::RateLookup;
use crate::catalog::Catalog;
use crate::errors::{EvaluateError, ValidationError};
use crate::model::{Band, CategoryCost, ScenarioResult, Selection};

/// Turns one scenario's inputs into a [`ScenarioResult`].
///
/// Holds only a borrowed catalog; every call is independent.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioEvaluator<'a> {
    catalog: &'a Catalog,
}

impl<'a> ScenarioEvaluator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Evaluate `selections` at `area_units` against `benchmark`.
    ///
    /// Output categories follow catalog order regardless of selection order. Either a complete
    /// result is returned or an error; nothing is partially populated.
    pub fn evaluate<B>(
        &self,
        area_units: f64,
        benchmark: &B,
        selections: &[Selection],
    ) -> Result<ScenarioResult, EvaluateError>
    where
        B: RateLookup + ?Sized,
    {
        if !(area_units.is_finite() && area_units > 0.0) {
            return Err(ValidationError::InvalidArea { area: area_units }.into());
        }

        let bands = self.resolve_bands(selections)?;

        let mut costs = Vec::with_capacity(self.catalog.len());
        for (category, band) in self.catalog.iter().zip(bands) {
            let rate = benchmark
                .rate(&category.id, band)
                .ok_or_else(|| EvaluateError::MissingRate {
                    category_id: category.id.clone(),
                    band,
                })?;
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(EvaluateError::InvalidRate {
                    category_id: category.id.clone(),
                    band,
                    rate,
                });
            }
            let cost = area_units * rate;
            if !cost.is_finite() {
                return Err(EvaluateError::CostOverflow {
                    category_id: category.id.clone(),
                    area_units,
                    rate,
                });
            }
            costs.push(cost);
        }

        let total_cost: f64 = costs.iter().sum();
        if !total_cost.is_finite() {
            return Err(EvaluateError::TotalOverflow { area_units });
        }
        let categories = self
            .catalog
            .iter()
            .zip(costs)
            .map(|(category, cost)| CategoryCost {
                category_id: category.id.clone(),
                label: category.label.clone(),
                cost,
                pct_of_total: if total_cost > 0.0 {
                    cost / total_cost
                } else {
                    0.0
                },
            })
            .collect();

        tracing::debug!(
            categories = self.catalog.len(),
            area_units,
            total_cost,
            currency = benchmark.currency(),
            "scenario evaluated"
        );

        Ok(ScenarioResult {
            total_cost,
            currency: benchmark.currency().to_string(),
            categories,
        })
    }

    /// Map selections onto catalog positions, rejecting unknown, duplicate and missing entries.
    fn resolve_bands(&self, selections: &[Selection]) -> Result<Vec<Band>, ValidationError> {
        let mut slots: Vec<Option<Band>> = vec![None; self.catalog.len()];

        for sel in selections {
            let pos = self.catalog.position(&sel.category_id).ok_or_else(|| {
                ValidationError::UnknownCategory {
                    category_id: sel.category_id.clone(),
                }
            })?;
            if slots[pos].replace(sel.band).is_some() {
                return Err(ValidationError::DuplicateSelection {
                    category_id: sel.category_id.clone(),
                });
            }
        }

        self.catalog
            .iter()
            .zip(slots)
            .map(|(category, slot)| {
                slot.ok_or_else(|| ValidationError::MissingSelection {
                    category_id: category.id.clone(),
                })
            })
            .collect()
    }
}
