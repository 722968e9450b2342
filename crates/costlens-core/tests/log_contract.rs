//! Warnings the host relies on to surface silently-corrected input.

use costlens_core::{
    compare, parse_settings, parse_workspace, Band, BenchmarkSet, Catalog, CompareConfig,
    ScenarioEvaluator, Selection, Settings,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl std::io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl CaptureWriter {
    /// `fields` objects of captured WARN events.
    fn warnings(&self) -> Vec<serde_json::Value> {
        let raw = String::from_utf8(self.buf.lock().unwrap().clone()).unwrap();
        raw.lines()
            .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
            .filter(|v| v.get("level").and_then(|l| l.as_str()) == Some("WARN"))
            .filter_map(|v| v.get("fields").cloned())
            .collect()
    }
}

fn setup_capture() -> (CaptureWriter, tracing::subscriber::DefaultGuard) {
    let writer = CaptureWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .json()
        .finish();
    (writer, tracing::subscriber::set_default(subscriber))
}

fn message(fields: &serde_json::Value) -> &str {
    fields
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
}

#[test]
fn test_unknown_settings_key_is_warned_not_rejected() {
    let (writer, _guard) = setup_capture();

    let raw = "version: 1\nfallback_band: high\ncolour: blue\n";
    let settings = parse_settings(raw, "s.yaml").unwrap();
    assert_eq!(settings.fallback_band, Band::High);

    let warnings = writer.warnings();
    assert_eq!(warnings.len(), 1, "warnings: {warnings:?}");
    assert_eq!(message(&warnings[0]), "ignoring unknown key");
    assert_eq!(warnings[0]["key"], "colour");
    assert_eq!(warnings[0]["source"], "s.yaml");
}

#[test]
fn test_dropped_selection_is_warned() {
    let (writer, _guard) = setup_capture();

    let raw = r#"
catalog: [{ id: energy, label: Energy }]
benchmarks:
  - { region: r, tier: t, currency: USD, rates: { energy: { low: 1, medium: 2, high: 3 } } }
scenarios:
  a: { region: r, tier: t, selections: { energy: low, parking: high } }
"#;
    let ws = parse_workspace(raw, "inline", &Settings::default()).unwrap();
    assert_eq!(ws.a.selections.len(), 1);

    let warnings = writer.warnings();
    assert!(
        warnings
            .iter()
            .any(|w| message(w) == "dropping selection for unknown category"
                && w["category"] == "parking"),
        "warnings: {warnings:?}"
    );
}

#[test]
fn test_clamped_thresholds_and_currency_mismatch_are_warned() {
    let (writer, _guard) = setup_capture();

    let catalog = Catalog::new([("energy", "Energy")]).unwrap();
    let ev = ScenarioEvaluator::new(&catalog);
    let sel = [Selection::new("energy", Band::Medium)];
    let usd = BenchmarkSet::new("r", "t", "USD").with_rate("energy", Band::Medium, 1.0);
    let eur = BenchmarkSet::new("r", "t", "EUR").with_rate("energy", Band::Medium, 2.0);
    let a = ev.evaluate(10.0, &usd, &sel).unwrap();
    let b = ev.evaluate(10.0, &eur, &sel).unwrap();

    let cfg = CompareConfig {
        medium_threshold: -0.5,
        high_threshold: f64::NAN,
        ..CompareConfig::default()
    };
    let report = compare(&a, &b, &cfg).unwrap();
    assert_eq!(report.currency, "USD");

    let messages: Vec<String> = writer
        .warnings()
        .iter()
        .map(|w| message(w).to_string())
        .collect();
    assert!(messages.iter().any(|m| m == "heat thresholds clamped"), "{messages:?}");
    assert!(messages.iter().any(|m| m.contains("different currencies")), "{messages:?}");
}
