//! ChangeObserver port - directory change notifications
//!
//! The sync engine never talks to a concrete notification backend; it hands
//! a mailbox sender to an observer and receives `ChangeEvent`s back.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use crate::error::ScssyncResult;

/// What happened to the paths of a change event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
    DirAdded,
    DirRemoved,
    Renamed,
    Other,
}

/// Messages delivered into a watcher's mailbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The observer finished registering and will deliver events from now on
    Ready,
    /// Something changed under the watched directory
    Changed {
        kind: ChangeKind,
        paths: Vec<PathBuf>,
    },
    /// The backend reported an error; the subscription stays alive
    Failed { message: String },
}

impl ChangeEvent {
    /// Shorthand used by tests and adapters
    pub fn changed(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        ChangeEvent::Changed {
            kind,
            paths: vec![path.into()],
        }
    }
}

/// Live observer registration; dropping it stops delivery.
pub struct Subscription {
    _guard: Option<Box<dyn Send>>,
}

impl Subscription {
    /// Keep `guard` alive for as long as the subscription lives
    pub fn new<G: Send + 'static>(guard: G) -> Self {
        Self {
            _guard: Some(Box::new(guard)),
        }
    }

    /// A subscription with nothing behind it
    pub fn detached() -> Self {
        Self { _guard: None }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self._guard.is_some())
            .finish()
    }
}

/// Directory change observer capability
pub trait ChangeObserver {
    /// Start delivering events for everything under `dir` into `mailbox`.
    ///
    /// Implementations send `ChangeEvent::Ready` once registration completes.
    fn subscribe(&self, dir: &Path, mailbox: Sender<ChangeEvent>) -> ScssyncResult<Subscription>;
}

impl<T: ChangeObserver + ?Sized> ChangeObserver for &T {
    fn subscribe(&self, dir: &Path, mailbox: Sender<ChangeEvent>) -> ScssyncResult<Subscription> {
        (**self).subscribe(dir, mailbox)
    }
}
