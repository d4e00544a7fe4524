//! Debounce state

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Pending changes plus a restartable deadline.
///
/// Every recorded change pushes the deadline out to `now + window`, so a
/// burst of events produces one sync `window` after the last of them.
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: BTreeSet<PathBuf>,
    deadline: Option<Instant>,
    window: Duration,
}

impl WatcherState {
    pub fn new(window: Duration) -> Self {
        Self {
            pending_changes: BTreeSet::new(),
            deadline: None,
            window,
        }
    }

    /// Record a change and (re)schedule the deadline
    pub fn add_change(&mut self, path: PathBuf, now: Instant) {
        self.pending_changes.insert(path);
        self.deadline = Some(now + self.window);
    }

    /// Record a change without scheduling anything (paused engines)
    pub fn record_only(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
    }

    /// Drop the deadline, keep what is pending
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether the deadline has passed
    pub fn should_sync(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Take all pending changes, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.deadline = None;
        std::mem::take(&mut self.pending_changes)
            .into_iter()
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }
}
