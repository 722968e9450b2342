use anyhow::{Context, Result};
use costlens_core::{load_settings, load_workspace, Session, Settings};
use std::path::Path;

/// Settings from `--config` (or defaults), then the workspace narrowed against them.
pub fn open_session(input: &Path, config: Option<&Path>) -> Result<Session> {
    let settings = match config {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };
    let workspace = load_workspace(input, &settings)
        .with_context(|| format!("failed to load workspace: {}", input.display()))?;

    tracing::debug!(
        categories = workspace.catalog.len(),
        benchmarks = workspace.library.len(),
        has_b = workspace.b.is_some(),
        "workspace loaded"
    );
    Ok(Session::new(workspace))
}
