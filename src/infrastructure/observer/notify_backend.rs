//! ChangeObserver backed by the `notify` crate

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{ChangeEvent, ChangeKind, ChangeObserver, Subscription};
use crate::error::{ScssyncError, ScssyncResult};

/// Recursive OS-level directory watching
#[derive(Debug, Clone, Default)]
pub struct NotifyObserver {
    config: Config,
}

impl NotifyObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Map a notify event kind onto ours; access events are dropped.
fn classify(kind: &EventKind) -> Option<ChangeKind> {
    Some(match kind {
        EventKind::Access(_) => return None,
        EventKind::Create(CreateKind::Folder) => ChangeKind::DirAdded,
        EventKind::Create(_) => ChangeKind::Added,
        EventKind::Remove(RemoveKind::Folder) => ChangeKind::DirRemoved,
        EventKind::Remove(_) => ChangeKind::Removed,
        EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Renamed,
        EventKind::Modify(_) => ChangeKind::Modified,
        EventKind::Any | EventKind::Other => ChangeKind::Other,
    })
}

/// Closest existing directory at or above `dir`
fn nearest_existing(dir: &Path) -> Option<PathBuf> {
    dir.ancestors().find(|p| p.is_dir()).map(Path::to_path_buf)
}

impl ChangeObserver for NotifyObserver {
    fn subscribe(&self, dir: &Path, mailbox: Sender<ChangeEvent>) -> ScssyncResult<Subscription> {
        let observer_error = |message: String| ScssyncError::Observer {
            path: dir.to_path_buf(),
            message,
        };

        // A watch dir that does not exist yet is watched through its parent
        // so that creating it later still triggers a sync.
        let watch_root =
            nearest_existing(dir).ok_or_else(|| observer_error("no existing ancestor".into()))?;
        if watch_root != dir {
            tracing::warn!(
                dir = %dir.display(),
                watching = %watch_root.display(),
                "watch directory does not exist; watching nearest ancestor"
            );
        }

        let tx = mailbox.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let Some(kind) = classify(&event.kind) {
                        let _ = tx.send(ChangeEvent::Changed {
                            kind,
                            paths: event.paths,
                        });
                    }
                }
                Err(e) => {
                    let _ = tx.send(ChangeEvent::Failed {
                        message: e.to_string(),
                    });
                }
            },
            self.config,
        )
        .map_err(|e| observer_error(e.to_string()))?;

        watcher
            .watch(&watch_root, RecursiveMode::Recursive)
            .map_err(|e| observer_error(e.to_string()))?;

        let _ = mailbox.send(ChangeEvent::Ready);
        Ok(Subscription::new(watcher))
    }
}
