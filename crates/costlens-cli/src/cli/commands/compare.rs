use super::exit_codes;
use super::render;
use super::workspace::open_session;
use crate::cli::args::{CompareArgs, OutputFormat};
use anyhow::{Context, Result};
use costlens_core::{CompareConfig, CompareOverrides, Side, SortMode};
use std::path::Path;

pub fn run(args: CompareArgs, config: Option<&Path>) -> Result<i32> {
    let path = &args.input.input;
    let mut session = open_session(path, config)?;

    if session.workspace().b.is_none() {
        tracing::warn!(
            input = %path.display(),
            "workspace has no scenario B; comparing A against a copy of itself"
        );
    }
    session.enable_comparison(true);
    let effective = resolve_compare_config(*session.compare_config(), &args);
    session.set_compare_config(effective);

    let view = session
        .view()
        .with_context(|| format!("cannot compare scenarios in {}", path.display()))?;

    match args.input.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => {
            let outcomes = [(Side::A, Some(&view.a)), (Side::B, view.b.as_ref())];
            for (side, outcome) in outcomes {
                if let Some(msg) = outcome.and_then(|o| o.error.as_deref()) {
                    eprintln!("error: scenario {side}: {msg}");
                }
            }
            if let Some(delta) = &view.delta {
                println!("{}", render::delta_text(delta));
            }
        }
    }

    Ok(if view.delta.is_some() {
        exit_codes::SUCCESS
    } else {
        exit_codes::SCENARIO_FAILED
    })
}

/// Flags win over the workspace/settings values they name.
fn resolve_compare_config(base: CompareConfig, args: &CompareArgs) -> CompareConfig {
    CompareOverrides {
        medium_threshold: args.medium_threshold,
        high_threshold: args.high_threshold,
        sort_mode: args.sort.map(SortMode::from),
        drivers_only: args.drivers_only.then_some(true),
    }
    .apply_to(base)
}
