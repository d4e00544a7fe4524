use std::path::Path;

use anyhow::{bail, Result};

use scssync::application::SyncOutcome;
use scssync::infrastructure::fs::LocalFs;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::sync::render_sync_report;

pub fn cmd_rehome(config: Option<&Path>, watcher: &str, ui: UiContext) -> Result<()> {
    let project = super::load_project(config, &ui)?;
    let mut engines = super::select_engines(&project, LocalFs::new(), Some(watcher))?;

    for (name, engine) in engines.iter_mut() {
        let (removed, report) = engine.rehome()?;
        if ui.json {
            let _ = crate::ui::json::emit(
                "rehome",
                serde_json::json!({
                    "event": "rehomed",
                    "watcher": name,
                    "removed": removed,
                    "imports": report.imports.len(),
                }),
            );
        } else {
            println!(
                "{} {}: removed {} floating import{}",
                Icon::Clean.colored(ui.color, ui.unicode),
                name,
                removed,
                if removed == 1 { "" } else { "s" }
            );
            print!(
                "{}",
                render_sync_report(name, &report, false, ui.color, ui.unicode)
            );
        }
        if let SyncOutcome::Failed(message) = &report.outcome {
            bail!("watcher '{}' failed to sync: {}", name, message);
        }
    }
    Ok(())
}
