use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use scssync::application::{Cleanup, WatchEvent, WatcherRegistry};
use scssync::domain::ports::SystemClock;
use scssync::domain::value_objects::path;
use scssync::infrastructure::fs::LocalFs;
use scssync::infrastructure::observer::NotifyObserver;

use crate::ui::context::UiContext;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

pub fn cmd_watch(config: Option<&Path>, cleanup: Cleanup, ui: UiContext) -> Result<()> {
    let project = super::load_project(config, &ui)?;
    let root = path::to_slash(&project.root_dir);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install the Ctrl+C handler")?;

    let emit = |event: WatchEvent| {
        if ui.json {
            println!("{}", event.to_json());
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered = render_watch_event(&timestamp, &event, ui.color, ui.unicode);
        match event {
            WatchEvent::Error { .. } | WatchEvent::MarkerWarning { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    };

    let mut registry = WatcherRegistry::new(LocalFs::new(), NotifyObserver::new());
    let reports = registry.add_all(project.watcher_specs()?)?;

    if !ui.json {
        print!(
            "{}",
            render_watch_header(&root, &registry.names(), ui.color, ui.unicode)
        );
    }
    emit(WatchEvent::WatchStarted {
        root,
        watchers: registry.names(),
    });
    for (name, report) in &reports {
        for event in WatchEvent::from_report(name, report) {
            emit(event);
        }
    }

    registry.run(&SystemClock, &running, &emit);

    let mut cleaned = cleanup != Cleanup::KeepMarkers;
    for (name, result) in registry.shutdown(cleanup) {
        if let Err(e) = result {
            cleaned = false;
            emit(WatchEvent::Error {
                watcher: Some(name),
                message: e.to_string(),
            });
        }
    }
    emit(WatchEvent::Shutdown { cleaned });

    Ok(())
}
