use scssync::application::WatchEvent;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;

pub fn render_watch_header(
    root: &str,
    watchers: &[String],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "scssync watch");
    header.add("Root", root);
    header.add("Watchers", watchers.join(", "));
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);

    match event {
        WatchEvent::WatchStarted { watchers, .. } => format!(
            "{} {} Watching {} director{}\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            watchers.len(),
            if watchers.len() == 1 { "y" } else { "ies" }
        ),
        WatchEvent::FileChanged { watcher, path } => format!(
            "{} {} {}: {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            watcher,
            path
        ),
        WatchEvent::SyncComplete {
            watcher,
            imports,
            skipped,
            action,
        } => {
            let icon = if *action == "unchanged" {
                Icon::Pending
            } else {
                Icon::Success
            }
            .colored(supports_color, supports_unicode);
            let skipped = if *skipped > 0 {
                format!(", {} skipped", skipped)
            } else {
                String::new()
            };
            format!(
                "{} {} {}: {} ({} imports{})\n",
                prefix, icon, watcher, action, imports, skipped
            )
        }
        WatchEvent::MarkerWarning { watcher, message } => format!(
            "{} {} {}: {}\n",
            prefix,
            Icon::Warning.colored(supports_color, supports_unicode),
            watcher,
            message
        ),
        WatchEvent::Error { watcher, message } => format!(
            "{} {} Error{}: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            watcher
                .as_deref()
                .map(|w| format!(" in {}", w))
                .unwrap_or_default(),
            message
        ),
        WatchEvent::Shutdown { cleaned } => format!(
            "\n{} {} Watch stopped{}.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            if *cleaned { ", markers removed" } else { "" }
        ),
    }
}
