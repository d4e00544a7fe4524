use std::path::Path;

use anyhow::Result;

use scssync::infrastructure::fs::LocalFs;

use crate::ui::context::UiContext;
use crate::ui::views::list::render_import_list;

pub fn cmd_list(config: Option<&Path>, watcher: &str, ui: UiContext) -> Result<()> {
    let project = super::load_project(config, &ui)?;
    let engines = super::select_engines(&project, LocalFs::new(), Some(watcher))?;

    for (name, engine) in &engines {
        let ids = engine.list_generated_import_ids();
        if ui.json {
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            let _ = crate::ui::json::emit(
                "list",
                serde_json::json!({
                    "event": "imports",
                    "watcher": name,
                    "owner": engine.owner().to_string(),
                    "imports": ids,
                }),
            );
        } else {
            print!(
                "{}",
                render_import_list(
                    name,
                    engine.owner().as_str(),
                    &ids,
                    ui.color,
                    ui.unicode
                )
            );
        }
    }
    Ok(())
}
