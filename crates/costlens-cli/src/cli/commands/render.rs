//! Plain-text rendering for terminal output.

use costlens_core::{DeltaReport, DeltaRow, ScenarioInput, ScenarioResult, Side};

const LABEL_WIDTH: usize = 24;

pub fn scenario_text(side: Side, input: &ScenarioInput, result: &ScenarioResult) -> String {
    let mut lines = vec![
        format!(
            "Scenario {side}: {}/{} @ {} units ({})",
            input.region, input.tier, input.area_units, result.currency
        ),
        format!(
            "  {:<w$} {:>12} {:>8}",
            "category",
            "cost",
            "share",
            w = LABEL_WIDTH
        ),
    ];
    for c in &result.categories {
        lines.push(format!(
            "  {:<w$} {:>12.2} {:>7.1}%",
            c.label,
            c.cost,
            c.pct_of_total * 100.0,
            w = LABEL_WIDTH
        ));
    }
    lines.push(format!(
        "  {:<w$} {:>12.2}",
        "total",
        result.total_cost,
        w = LABEL_WIDTH
    ));
    lines.join("\n")
}

/// Rows get a `*` marker when they are top drivers.
pub fn delta_text(report: &DeltaReport) -> String {
    let mut lines = vec![
        format!(
            "Comparison A -> B ({}): total A {:.2}, total B {:.2}, delta {:+.2}",
            report.currency, report.total_a, report.total_b, report.total_delta
        ),
        format!(
            "    {:<w$} {:>12} {:>12} {:>12} {:>9} {:>7}",
            "category",
            "A",
            "B",
            "delta",
            "share",
            "heat",
            w = LABEL_WIDTH
        ),
    ];
    lines.extend(report.rows.iter().map(row_line));
    if report.rows.is_empty() {
        lines.push("    (no rows)".to_string());
    }

    lines.push(String::new());
    lines.push(summary_line("Top increases", &report.top_increases));
    lines.push(summary_line("Top decreases", &report.top_decreases));
    lines.join("\n")
}

fn row_line(r: &DeltaRow) -> String {
    format!(
        "  {} {:<w$} {:>12.2} {:>12.2} {:>+12.2} {:>+7.1}pp {:>7}",
        if r.is_top_driver { '*' } else { ' ' },
        r.label,
        r.cost_a,
        r.cost_b,
        r.delta_cost,
        r.delta_pct * 100.0,
        r.heat.as_str(),
        w = LABEL_WIDTH
    )
}

fn summary_line(title: &str, rows: &[DeltaRow]) -> String {
    if rows.is_empty() {
        return format!("{title}: none");
    }
    let items: Vec<String> = rows
        .iter()
        .map(|r| format!("{} {:+.2}", r.label, r.delta_cost))
        .collect();
    format!("{title}: {}", items.join(", "))
}
