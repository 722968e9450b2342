use super::{CompareConfig, DeltaReport, DeltaRow, Direction, Heat, SortMode};
use crate::errors::CompareError;
use crate::model::{CategoryCost, ScenarioResult, Side};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// At most this many rows are marked as top drivers.
pub const MAX_TOP_DRIVERS: usize = 3;
/// Length cap for `top_increases` and `top_decreases`.
pub const MAX_SUMMARY_ROWS: usize = 3;

/// Compare scenario `b` against baseline `a`.
///
/// Drivers, heat and the summary lists are always derived from the full row set; `sort_mode`
/// and `drivers_only` only shape the returned `rows`. Both results must come from the same
/// catalog, otherwise a [`CompareError::CategoryMismatch`] is returned.
pub fn compare(
    a: &ScenarioResult,
    b: &ScenarioResult,
    config: &CompareConfig,
) -> Result<DeltaReport, CompareError> {
    let effective = config.clamped();
    if effective != *config {
        tracing::warn!(
            medium = config.medium_threshold,
            high = config.high_threshold,
            clamped_medium = effective.medium_threshold,
            clamped_high = effective.high_threshold,
            "heat thresholds clamped"
        );
    }
    if a.currency != b.currency {
        tracing::warn!(
            currency_a = %a.currency,
            currency_b = %b.currency,
            "comparing scenarios priced in different currencies; reporting in A's currency"
        );
    }

    let mut rows = build_rows(a, b, &effective)?;
    mark_top_drivers(&mut rows);

    let top_increases = top_rows(&rows, |r| r.delta_cost > 0.0, |x, y| {
        y.delta_cost.total_cmp(&x.delta_cost)
    });
    let top_decreases = top_rows(&rows, |r| r.delta_cost < 0.0, |x, y| {
        x.delta_cost.total_cmp(&y.delta_cost)
    });

    tracing::debug!(
        categories = rows.len(),
        drivers = ?rows.iter().filter(|r| r.is_top_driver).map(|r| r.category_id.as_str()).collect::<Vec<_>>(),
        total_a = a.total_cost,
        total_b = b.total_cost,
        "scenarios compared"
    );

    match effective.sort_mode {
        SortMode::Impact => rows.sort_by(by_abs_delta_desc),
        SortMode::Category => {}
    }
    if effective.drivers_only {
        rows.retain(|r| r.is_top_driver);
    }

    Ok(DeltaReport {
        total_delta: b.total_cost - a.total_cost,
        rows,
        top_increases,
        top_decreases,
        currency: a.currency.clone(),
        total_a: a.total_cost,
        total_b: b.total_cost,
    })
}

/// One row per category of `a`, in `a`'s (catalog) order, with threshold-only heat.
fn build_rows(
    a: &ScenarioResult,
    b: &ScenarioResult,
    config: &CompareConfig,
) -> Result<Vec<DeltaRow>, CompareError> {
    let total_a_floor = a.total_cost.max(1.0);
    let by_id: HashMap<&str, &CategoryCost> = b
        .categories
        .iter()
        .map(|c| (c.category_id.as_str(), c))
        .collect();

    let mut rows = Vec::with_capacity(a.categories.len());
    // `a` comes from the evaluator, so its position is the catalog position.
    for (catalog_order, ca) in a.categories.iter().enumerate() {
        let cb = by_id
            .get(ca.category_id.as_str())
            .ok_or_else(|| CompareError::CategoryMismatch {
                category_id: ca.category_id.clone(),
                missing_from: Side::B,
            })?;

        let delta_cost = cb.cost - ca.cost;
        let impact_fraction = delta_cost.abs() / total_a_floor;
        rows.push(DeltaRow {
            category_id: ca.category_id.clone(),
            label: ca.label.clone(),
            catalog_order,
            cost_a: ca.cost,
            cost_b: cb.cost,
            delta_cost,
            pct_a: ca.pct_of_total,
            pct_b: cb.pct_of_total,
            delta_pct: cb.pct_of_total - ca.pct_of_total,
            impact_fraction,
            direction: Direction::of(delta_cost),
            heat: Heat::classify(
                impact_fraction,
                config.medium_threshold,
                config.high_threshold,
            ),
            is_top_driver: false,
        });
    }

    let known: HashSet<&str> = a
        .categories
        .iter()
        .map(|c| c.category_id.as_str())
        .collect();
    if let Some(extra) = b
        .categories
        .iter()
        .find(|c| !known.contains(c.category_id.as_str()))
    {
        return Err(CompareError::CategoryMismatch {
            category_id: extra.category_id.clone(),
            missing_from: Side::A,
        });
    }

    Ok(rows)
}

/// Mark the largest non-zero changes as drivers and lift any `low` driver to `medium`.
///
/// `rows` must be in catalog order: the stable sort keeps catalog order among equal magnitudes.
fn mark_top_drivers(rows: &mut [DeltaRow]) {
    let mut ranked: Vec<usize> = (0..rows.len())
        .filter(|&i| rows[i].delta_cost != 0.0)
        .collect();
    ranked.sort_by(|&i, &j| by_abs_delta_desc(&rows[i], &rows[j]));

    for &i in ranked.iter().take(MAX_TOP_DRIVERS) {
        let row = &mut rows[i];
        row.is_top_driver = true;
        if row.heat == Heat::Low && row.impact_fraction > 0.0 {
            row.heat = Heat::Medium;
        }
    }
}

fn by_abs_delta_desc(x: &DeltaRow, y: &DeltaRow) -> Ordering {
    y.delta_cost.abs().total_cmp(&x.delta_cost.abs())
}

fn top_rows<P, C>(rows: &[DeltaRow], keep: P, order: C) -> Vec<DeltaRow>
where
    P: Fn(&DeltaRow) -> bool,
    C: Fn(&DeltaRow, &DeltaRow) -> Ordering,
{
    let mut picked: Vec<&DeltaRow> = rows.iter().filter(|r| keep(*r)).collect();
    picked.sort_by(|x, y| order(*x, *y));
    picked
        .into_iter()
        .take(MAX_SUMMARY_ROWS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DEFAULT_MEDIUM_THRESHOLD;

    fn result(costs: &[(&str, f64)]) -> ScenarioResult {
        let total: f64 = costs.iter().map(|(_, c)| c).sum();
        ScenarioResult {
            total_cost: total,
            currency: "USD".into(),
            categories: costs
                .iter()
                .map(|(id, cost)| CategoryCost {
                    category_id: id.to_string(),
                    label: id.to_uppercase(),
                    cost: *cost,
                    pct_of_total: if total > 0.0 { cost / total } else { 0.0 },
                })
                .collect(),
        }
    }

    #[test]
    fn worked_example_from_two_medium_scenarios() {
        let a = result(&[("x", 500.0), ("y", 1000.0), ("z", 200.0)]);
        let b = result(&[("x", 600.0), ("y", 900.0), ("z", 200.0)]);
        let report = compare(&a, &b, &CompareConfig::default()).unwrap();

        assert_eq!(report.total_delta, 0.0);
        let x = report.row("x").unwrap();
        let y = report.row("y").unwrap();
        let z = report.row("z").unwrap();
        assert_eq!(x.delta_cost, 100.0);
        assert_eq!(y.delta_cost, -100.0);
        assert!((x.impact_fraction - 100.0 / 1700.0).abs() < 1e-12);
        assert_eq!((x.heat, y.heat, z.heat), (Heat::High, Heat::High, Heat::Low));
        assert_eq!(z.direction, Direction::Flat);
        assert!(x.is_top_driver && y.is_top_driver && !z.is_top_driver);

        let inc: Vec<_> = report.top_increases.iter().map(|r| r.category_id.as_str()).collect();
        let dec: Vec<_> = report.top_decreases.iter().map(|r| r.category_id.as_str()).collect();
        assert_eq!(inc, vec!["x"]);
        assert_eq!(dec, vec!["y"]);
    }

    #[test]
    fn small_driver_is_upgraded_to_medium() {
        // Baseline total is large, so a 10-unit change is well under the medium threshold.
        let a = result(&[("big", 100_000.0), ("small", 10.0)]);
        let b = result(&[("big", 100_000.0), ("small", 20.0)]);
        let report = compare(&a, &b, &CompareConfig::default()).unwrap();

        let small = report.row("small").unwrap();
        assert!(small.is_top_driver);
        assert!(small.impact_fraction < DEFAULT_MEDIUM_THRESHOLD);
        assert_eq!(small.heat, Heat::Medium);
    }

    #[test]
    fn driver_ties_break_by_catalog_order() {
        let a = result(&[("a", 10.0), ("b", 10.0), ("c", 10.0), ("d", 10.0)]);
        let b = result(&[("a", 15.0), ("b", 5.0), ("c", 15.0), ("d", 15.0)]);
        let report = compare(&a, &b, &CompareConfig::default()).unwrap();

        let drivers: Vec<_> = report.drivers().map(|r| r.category_id.as_str()).collect();
        assert_eq!(drivers, vec!["a", "b", "c"]);
        assert!(!report.row("d").unwrap().is_top_driver);
    }

    #[test]
    fn catalog_order_matches_catalog_positions() {
        use crate::benchmark::BenchmarkSet;
        use crate::catalog::Catalog;
        use crate::evaluate::ScenarioEvaluator;
        use crate::model::{Band, Selection};

        let cat = Catalog::new([("w", "W"), ("v", "V"), ("u", "U")]).unwrap();
        let bench = ["w", "v", "u"]
            .iter()
            .fold(BenchmarkSet::new("r", "t", "USD"), |b, id| {
                b.with_rate(*id, Band::Low, 1.0).with_rate(*id, Band::High, 2.0)
            });
        let ev = ScenarioEvaluator::new(&cat);
        let sels_a: Vec<_> = ["u", "v", "w"]
            .iter()
            .map(|id| Selection::new(*id, Band::Low))
            .collect();
        let sels_b = vec![
            Selection::new("u", Band::High),
            Selection::new("w", Band::Low),
            Selection::new("v", Band::High),
        ];
        let a = ev.evaluate(10.0, &bench, &sels_a).unwrap();
        let b = ev.evaluate(10.0, &bench, &sels_b).unwrap();

        let report = compare(&a, &b, &CompareConfig::default()).unwrap();
        for row in &report.rows {
            assert_eq!(Some(row.catalog_order), cat.position(&row.category_id));
        }
    }

    #[test]
    fn missing_category_in_b_is_a_mismatch() {
        let a = result(&[("x", 1.0), ("y", 2.0)]);
        let b = result(&[("x", 1.0)]);
        let err = compare(&a, &b, &CompareConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CompareError::CategoryMismatch {
                category_id: "y".into(),
                missing_from: Side::B
            }
        );
    }

    #[test]
    fn extra_category_in_b_is_a_mismatch() {
        let a = result(&[("x", 1.0)]);
        let b = result(&[("x", 1.0), ("w", 3.0)]);
        let err = compare(&a, &b, &CompareConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CompareError::CategoryMismatch {
                category_id: "w".into(),
                missing_from: Side::A
            }
        );
    }

    #[test]
    fn zero_baseline_uses_unit_floor() {
        let a = result(&[("x", 0.0)]);
        let b = result(&[("x", 0.5)]);
        let report = compare(&a, &b, &CompareConfig::default()).unwrap();
        assert_eq!(report.rows[0].impact_fraction, 0.5);
        assert_eq!(report.rows[0].heat, Heat::High);
    }
}
