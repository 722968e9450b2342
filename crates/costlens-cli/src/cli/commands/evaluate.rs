use super::exit_codes;
use super::render;
use super::workspace::open_session;
use crate::cli::args::{EvaluateArgs, OutputFormat};
use anyhow::{Context, Result};
use costlens_core::{ScenarioOutcome, Side};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct EvaluateOutput<'a> {
    scenario: Side,
    region: &'a str,
    tier: &'a str,
    area_units: f64,
    #[serde(flatten)]
    outcome: &'a ScenarioOutcome,
}

pub fn run(args: EvaluateArgs, config: Option<&Path>) -> Result<i32> {
    let path = &args.input.input;
    let mut session = open_session(path, config)?;
    let side = Side::from(args.scenario);

    if let Some(area) = args.area {
        session
            .set_area(side, area)
            .with_context(|| format!("cannot set area in {}", path.display()))?;
    }
    let outcome = session
        .evaluate(side)
        .with_context(|| format!("cannot evaluate {}", path.display()))?;
    let input = session
        .workspace()
        .scenario(side)
        .with_context(|| format!("scenario {side} is not defined in {}", path.display()))?;

    match args.input.format {
        OutputFormat::Json => {
            let out = EvaluateOutput {
                scenario: side,
                region: &input.region,
                tier: &input.tier,
                area_units: input.area_units,
                outcome: &outcome,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => match (&outcome.result, &outcome.error) {
            (Some(result), _) => println!("{}", render::scenario_text(side, input, result)),
            (None, Some(msg)) => eprintln!("error: scenario {side}: {msg}"),
            (None, None) => {}
        },
    }

    Ok(if outcome.is_ok() {
        exit_codes::SUCCESS
    } else {
        exit_codes::SCENARIO_FAILED
    })
}
