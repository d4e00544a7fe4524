//! Command handlers
//!
//! Each handler loads the project configuration, drives the library and
//! renders through `crate::ui`.

pub mod clean;
pub mod list;
pub mod rehome;
pub mod sync;
pub mod watch;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use scssync::config::{self, ConfigWarning, ProjectConfig};
use scssync::domain::ports::FileSystem;
use scssync::{detached_engines, ScssyncError, SyncEngine};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Load `scssync.json` (or the `--config` / `SCSSYNC_CONFIG` file), apply
/// environment overrides and report unknown keys.
pub fn load_project(cli_path: Option<&Path>, ui: &UiContext) -> Result<ProjectConfig> {
    let path = config::resolve_path(cli_path);
    let (project, warnings) = ProjectConfig::load_with_warnings(&path)?;
    report_warnings(&warnings, ui);
    let project = config::with_env_overrides(project);
    tracing::debug!(
        config = %path.display(),
        root = %project.root_dir.display(),
        watchers = project.watchers.len(),
        "configuration loaded"
    );
    Ok(project)
}

fn report_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    for warning in warnings {
        tracing::warn!(key = %warning.key, "unknown configuration key");
        if ui.json {
            let _ = crate::ui::json::emit(
                "config",
                serde_json::json!({
                    "event": "config_warning",
                    "key": warning.key,
                    "suggestion": warning.suggestion,
                }),
            );
        } else {
            eprintln!(
                "{} {}",
                Icon::Warning.colored(ui.color, ui.unicode),
                ColoredText::warning(warning.to_string()).render(ui.color)
            );
        }
    }
}

/// Engines for every configured watcher, or just `only`.
///
/// Nested-watcher exclusions are computed over the whole configuration, so
/// syncing one watcher alone renders the same region as `watch` would.
pub fn select_engines<F: FileSystem + Clone>(
    project: &ProjectConfig,
    fs: F,
    only: Option<&str>,
) -> Result<BTreeMap<String, SyncEngine<F>>> {
    let mut engines = detached_engines(fs, project.watcher_specs()?)
        .with_context(|| format!("invalid watchers in {}", project.source.display()))?;
    if let Some(name) = only {
        let engine = engines
            .remove(name)
            .ok_or_else(|| ScssyncError::UnknownWatcher {
                name: name.to_string(),
            })?;
        engines = BTreeMap::from([(name.to_string(), engine)]);
    }
    Ok(engines)
}

/// `path` relative to `root`, `/`-separated, for display
pub fn display_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    scssync::domain::value_objects::path::to_slash(rel)
}
