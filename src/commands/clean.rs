use std::path::Path;

use anyhow::{Context, Result};

use scssync::infrastructure::fs::LocalFs;

use crate::ui::context::UiContext;
use crate::ui::views::clean::render_clean_result;

/// Remove generated regions; with `keep_body` only the markers go.
pub fn cmd_clean(
    config: Option<&Path>,
    watcher: Option<&str>,
    keep_body: bool,
    ui: UiContext,
) -> Result<()> {
    let project = super::load_project(config, &ui)?;
    let engines = super::select_engines(&project, LocalFs::new(), watcher)?;

    for (name, engine) in &engines {
        let action = engine
            .remove_markers(!keep_body)
            .with_context(|| format!("failed to clean watcher '{}'", name))?;
        if ui.json {
            let _ = crate::ui::json::emit(
                "clean",
                serde_json::json!({
                    "event": "cleaned",
                    "watcher": name,
                    "removed": action == scssync::domain::services::RegionAction::Removed,
                    "keep_body": keep_body,
                }),
            );
        } else {
            print!(
                "{}",
                render_clean_result(name, action, keep_body, ui.color, ui.unicode)
            );
        }
    }
    Ok(())
}
