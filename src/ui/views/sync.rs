//! Sync command UI views

use scssync::application::{SyncOutcome, SyncReport};
use scssync::domain::services::RegionAction;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_sync_header(
    root: &str,
    watchers: usize,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = if dry_run {
        "scssync sync (dry run)"
    } else {
        "scssync sync"
    };
    let mut header = CommandHeader::new(Icon::Sync, title);
    header.add("Root", root);
    header.add("Watchers", watchers.to_string());
    header.render(supports_color, supports_unicode)
}

/// Short verb for what a sync did
pub fn outcome_label(outcome: &SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Written(RegionAction::Inserted) => "inserted",
        SyncOutcome::Written(_) => "replaced",
        SyncOutcome::Unchanged => "unchanged",
        SyncOutcome::Failed(_) => "failed",
    }
}

/// One line per watcher, plus a warning line for malformed markers
pub fn render_sync_report(
    watcher: &str,
    report: &SyncReport,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    if let Some(fault) = &report.fault {
        out.push_str(&format!(
            "{} {}: {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            watcher,
            ColoredText::warning(fault.to_string()).render(supports_color)
        ));
    }

    let (icon, detail) = match &report.outcome {
        SyncOutcome::Failed(message) => (
            Icon::Error,
            ColoredText::error(message.as_str()).render(supports_color),
        ),
        SyncOutcome::Unchanged => (
            Icon::Pending,
            ColoredText::dim("up to date").render(supports_color),
        ),
        SyncOutcome::Written(_) => {
            let verb = if dry_run { "would be " } else { "" };
            (
                Icon::Success,
                format!("{}{}", verb, outcome_label(&report.outcome)),
            )
        }
    };

    let mut counts = format!("{} imports", report.imports.len());
    if report.skipped > 0 {
        counts.push_str(&format!(", {} skipped", report.skipped));
    }
    out.push_str(&format!(
        "{} {} {} ({})\n",
        icon.colored(supports_color, supports_unicode),
        ColoredText::info(watcher).bold().render(supports_color),
        detail,
        counts
    ));
    out
}

pub fn render_sync_summary(
    written: usize,
    unchanged: usize,
    failed: usize,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let verb = if dry_run { "would change" } else { "updated" };
    let line = format!(
        "{} {}, {} unchanged, {} failed",
        written, verb, unchanged, failed
    );
    if failed > 0 {
        format!(
            "\n{} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning(line).render(supports_color)
        )
    } else {
        format!(
            "\n{} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            ColoredText::success(line).render(supports_color)
        )
    }
}
