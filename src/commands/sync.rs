//! Sync command handler
//!
//! One pass over every watcher (or one of them). With `--dry-run` all writes
//! land in a shared in-memory overlay, so a later watcher sees what an
//! earlier one would have written to the same target.

use std::path::Path;

use anyhow::{bail, Result};

use scssync::application::{SyncOutcome, SyncReport, WatchEvent};
use scssync::config::ProjectConfig;
use scssync::domain::ports::FileSystem;
use scssync::domain::value_objects::path;
use scssync::infrastructure::fs::{DryRunFs, LocalFs};

use crate::ui::ci::{github_actions_annotation, in_github_actions, AnnotationLevel};
use crate::ui::components::diff::render_unified_diff_with_line_numbers;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::sync::{render_sync_header, render_sync_report, render_sync_summary};

pub fn cmd_sync(
    config: Option<&Path>,
    watcher: Option<&str>,
    dry_run: bool,
    ui: UiContext,
) -> Result<()> {
    let project = super::load_project(config, &ui)?;

    let reports = if dry_run {
        let fs = DryRunFs::new();
        let reports = sync_all(&project, fs.clone(), watcher, dry_run, &ui)?;
        if !ui.json {
            print_diffs(&project, &fs, &ui);
        }
        reports
    } else {
        sync_all(&project, LocalFs::new(), watcher, dry_run, &ui)?
    };

    let written = reports.iter().filter(|(_, r)| r.wrote()).count();
    let failed = reports.iter().filter(|(_, r)| !r.is_success()).count();
    let unchanged = reports.len() - written - failed;
    if !ui.json {
        print!(
            "{}",
            render_sync_summary(written, unchanged, failed, dry_run, ui.color, ui.unicode)
        );
    }

    if failed > 0 {
        bail!("{} of {} watchers failed to sync", failed, reports.len());
    }
    Ok(())
}

fn sync_all<F: FileSystem + Clone>(
    project: &ProjectConfig,
    fs: F,
    watcher: Option<&str>,
    dry_run: bool,
    ui: &UiContext,
) -> Result<Vec<(String, SyncReport)>> {
    let mut engines = super::select_engines(project, fs, watcher)?;

    if !ui.json {
        print!(
            "{}",
            render_sync_header(
                &path::to_slash(&project.root_dir),
                engines.len(),
                dry_run,
                ui.color,
                ui.unicode
            )
        );
    }

    let mut reports = Vec::with_capacity(engines.len());
    for (name, engine) in engines.iter_mut() {
        let report = engine.sync_now();
        if ui.json {
            emit_json(name, &report, dry_run);
        } else {
            print!(
                "{}",
                render_sync_report(name, &report, dry_run, ui.color, ui.unicode)
            );
        }
        if in_github_actions() {
            annotate(project, &engine.spec().target_path(), &report);
        }
        reports.push((name.clone(), report));
    }
    Ok(reports)
}

fn emit_json(watcher: &str, report: &SyncReport, dry_run: bool) {
    for event in WatchEvent::from_report(watcher, report) {
        let mut value = serde_json::to_value(&event).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert("dry_run".to_string(), serde_json::json!(dry_run));
        }
        let _ = crate::ui::json::emit("sync", value);
    }
}

fn annotate(project: &ProjectConfig, target: &Path, report: &SyncReport) {
    let file = super::display_path(target, &project.root_dir);
    if let Some(fault) = &report.fault {
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Warning,
                &fault.to_string(),
                Some(&file),
                Some(fault.line())
            )
        );
    }
    if let SyncOutcome::Failed(message) = &report.outcome {
        println!(
            "{}",
            github_actions_annotation(AnnotationLevel::Error, message, Some(&file), None)
        );
    }
}

fn print_diffs(project: &ProjectConfig, fs: &DryRunFs, ui: &UiContext) {
    let disk = LocalFs::new();
    for (target, new) in fs.pending_writes() {
        let old = disk.read(&target).unwrap_or_default();
        let display = super::display_path(&target, &project.root_dir);
        println!(
            "\n{} {}",
            Icon::Diff.colored(ui.color, ui.unicode),
            display
        );
        print!(
            "{}",
            render_unified_diff_with_line_numbers(&display, &old, &new, ui.color)
        );
    }
}
