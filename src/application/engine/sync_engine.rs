//! Per-watcher sync engine

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use crate::application::discover::discover;
use crate::domain::entities::WatcherSpec;
use crate::domain::ports::{ChangeEvent, ChangeKind, ChangeObserver, FileSystem, Subscription};
use crate::domain::services::{marker_region, ordered_ids, render_body, MarkerFault, RegionAction};
use crate::domain::value_objects::{path, ImportId, OwnerId};
use crate::error::{ScssyncError, ScssyncResult};

use super::debounce::WatcherState;
use super::report::{SyncOutcome, SyncReport, Tick};

/// Lifecycle of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Active,
    /// Events are recorded but nothing syncs until `resume`
    Paused,
    /// Terminal; the subscription has been released
    Closed,
}

/// One watcher: owns its spec, its mailbox and its debounce state.
///
/// The engine never reads the clock. Whoever drives it passes `now` into
/// `pump`, which keeps debouncing deterministic under test.
pub struct SyncEngine<F: FileSystem> {
    spec: WatcherSpec,
    fs: F,
    status: EngineStatus,
    state: WatcherState,
    sender: Sender<ChangeEvent>,
    mailbox: Receiver<ChangeEvent>,
    subscription: Option<Subscription>,
    ready: bool,
}

impl<F: FileSystem> SyncEngine<F> {
    /// Validate `spec`, start observing its watch directory and run the
    /// initial sync.
    ///
    /// Configuration errors are returned before anything is touched. A
    /// failing initial sync is reported, not returned: the engine stays
    /// alive and retries on the next change.
    pub fn create<O: ChangeObserver + ?Sized>(
        spec: WatcherSpec,
        fs: F,
        observer: &O,
    ) -> ScssyncResult<(Self, SyncReport)> {
        let mut engine = Self::detached(spec, fs)?;
        let subscription = observer.subscribe(&engine.spec.watch_path(), engine.sender.clone())?;
        engine.subscription = Some(subscription);
        let report = engine.initial_sync();
        Ok((engine, report))
    }

    /// A validated engine without an observer; it only syncs when asked.
    pub fn detached(spec: WatcherSpec, fs: F) -> ScssyncResult<Self> {
        spec.validate(&fs)?;
        let (sender, mailbox) = channel();
        Ok(Self {
            state: WatcherState::new(spec.debounce),
            spec,
            fs,
            status: EngineStatus::Active,
            sender,
            mailbox,
            subscription: None,
            ready: false,
        })
    }

    pub fn spec(&self) -> &WatcherSpec {
        &self.spec
    }

    pub fn owner(&self) -> &OwnerId {
        &self.spec.owner_id
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Whether the observer has signalled that it is delivering events
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Sender side of the mailbox
    pub fn mailbox(&self) -> Sender<ChangeEvent> {
        self.sender.clone()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.deadline()
    }

    pub fn has_pending(&self) -> bool {
        self.state.has_pending()
    }

    /// Discover and synchronize once, regardless of observer state
    pub fn initial_sync(&mut self) -> SyncReport {
        tracing::debug!(owner = %self.spec.owner_id, "initial sync");
        self.sync_now()
    }

    /// Drain the mailbox and run a sync if the debounce deadline has passed.
    pub fn pump(&mut self, now: Instant) -> Tick {
        loop {
            match self.mailbox.try_recv() {
                Ok(event) => self.handle(event, now),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.status != EngineStatus::Active || !self.state.should_sync(now) {
            return Tick::default();
        }
        let changed = self.state.take_changes();
        Tick {
            changed,
            report: Some(self.sync_now()),
        }
    }

    fn handle(&mut self, event: ChangeEvent, now: Instant) {
        if self.status == EngineStatus::Closed {
            return;
        }
        match event {
            ChangeEvent::Ready => {
                tracing::debug!(owner = %self.spec.owner_id, "observer ready");
                self.ready = true;
            }
            ChangeEvent::Failed { message } => {
                tracing::warn!(owner = %self.spec.owner_id, %message, "observer error");
            }
            ChangeEvent::Changed { kind, paths } => {
                let paths = if paths.is_empty() {
                    vec![self.spec.watch_path()]
                } else {
                    paths
                };
                for changed in paths {
                    if !self.is_relevant(kind, &changed) {
                        continue;
                    }
                    tracing::trace!(owner = %self.spec.owner_id, path = %changed.display(), ?kind, "change");
                    match self.status {
                        EngineStatus::Active => self.state.add_change(changed, now),
                        _ => self.state.record_only(changed),
                    }
                }
            }
        }
    }

    fn is_relevant(&self, kind: ChangeKind, changed: &Path) -> bool {
        let changed = path::normalize(changed);
        if self.spec.is_target(&changed) {
            return false;
        }
        if !path::is_same_or_descendant(&changed, &self.spec.watch_path()) {
            return false;
        }
        if self
            .spec
            .exclude_subtrees
            .iter()
            .any(|excluded| path::is_same_or_descendant(&changed, excluded))
        {
            return false;
        }
        match kind {
            ChangeKind::Added | ChangeKind::Modified => {
                // A directory moved in brings its partials without per-file events
                changed.extension().is_some_and(|ext| ext == "scss")
                    || (self.fs.exists(&changed) && !self.fs.is_file(&changed))
            }
            _ => true,
        }
    }

    /// Run one full discovery + synchronize pass now.
    pub fn sync_now(&mut self) -> SyncReport {
        let discovery = discover(&self.spec);
        let body = render_body(&discovery.imports, self.spec.group_headings);
        let imports = ordered_ids(&discovery.imports);

        let (outcome, fault) = match self.write_region(&body) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(owner = %self.spec.owner_id, error = %e, "sync failed");
                (SyncOutcome::Failed(e.to_string()), None)
            }
        };
        if let SyncOutcome::Written(action) = &outcome {
            tracing::info!(
                owner = %self.spec.owner_id,
                imports = imports.len(),
                ?action,
                "region synchronized"
            );
        }

        SyncReport {
            owner: self.spec.owner_id.clone(),
            imports,
            skipped: discovery.skipped.len(),
            outcome,
            fault,
        }
    }

    fn write_region(&self, body: &[String]) -> ScssyncResult<(SyncOutcome, Option<MarkerFault>)> {
        let target = self.spec.target_path();
        let current = self.fs.read(&target)?;
        let rewrite = marker_region::rewrite(
            &current,
            &self.spec.owner_id,
            body,
            self.spec.insertion_line,
        );
        if let Some(fault) = rewrite.fault {
            tracing::warn!(
                owner = %self.spec.owner_id,
                target = %target.display(),
                %fault,
                "malformed markers left in place; inserting a fresh region"
            );
        }
        if rewrite.text == current {
            return Ok((SyncOutcome::Unchanged, rewrite.fault));
        }
        self.fs.write(&target, &rewrite.text)?;
        Ok((SyncOutcome::Written(rewrite.action), rewrite.fault))
    }

    /// Stop syncing on changes; later events are kept as pending.
    pub fn pause(&mut self) -> ScssyncResult<()> {
        self.ensure_open()?;
        if self.status == EngineStatus::Active {
            tracing::debug!(owner = %self.spec.owner_id, "paused");
            self.status = EngineStatus::Paused;
            self.state.cancel();
        }
        Ok(())
    }

    /// Reactivate and sync immediately, whatever the debounce state.
    pub fn resume(&mut self) -> ScssyncResult<SyncReport> {
        self.ensure_open()?;
        tracing::debug!(owner = %self.spec.owner_id, "resumed");
        self.status = EngineStatus::Active;
        self.state.take_changes();
        Ok(self.sync_now())
    }

    /// Release the subscription and stop for good. Markers stay in place.
    pub fn close(&mut self) {
        if self.status == EngineStatus::Closed {
            return;
        }
        tracing::debug!(owner = %self.spec.owner_id, "closed");
        self.status = EngineStatus::Closed;
        self.subscription = None;
        self.state.take_changes();
        while self.mailbox.try_recv().is_ok() {}
    }

    /// Delete this watcher's markers, and the body with them when
    /// `delete_body` is set.
    pub fn remove_markers(&self, delete_body: bool) -> ScssyncResult<RegionAction> {
        let target = self.spec.target_path();
        let current = self.fs.read(&target)?;
        let rewrite = marker_region::remove_region(&current, &self.spec.owner_id, delete_body);
        if let Some(fault) = rewrite.fault {
            tracing::warn!(owner = %self.spec.owner_id, %fault, "malformed markers not removed");
        }
        if rewrite.text != current {
            self.fs.write(&target, &rewrite.text)?;
        }
        tracing::info!(owner = %self.spec.owner_id, delete_body, action = ?rewrite.action, "markers removed");
        Ok(rewrite.action)
    }

    /// Ids a sync would render right now (fresh discovery)
    pub fn list_generated_import_ids(&self) -> Vec<ImportId> {
        ordered_ids(&discover(&self.spec).imports)
    }

    /// Replace the set of pruned subtrees. Returns whether it changed.
    pub fn set_exclusions(&mut self, exclusions: BTreeSet<PathBuf>) -> bool {
        let exclusions: BTreeSet<PathBuf> = exclusions.iter().map(|p| path::normalize(p)).collect();
        if exclusions == self.spec.exclude_subtrees {
            return false;
        }
        tracing::debug!(owner = %self.spec.owner_id, count = exclusions.len(), "exclusions updated");
        self.spec.exclude_subtrees = exclusions;
        true
    }

    pub fn set_debounce(&mut self, window: Duration) {
        self.spec.debounce = window;
        self.state.set_window(window);
    }

    /// Remove `@import` lines for this watcher's ids that sit outside
    /// every region, then sync so they live only inside the region.
    pub fn rehome(&mut self) -> ScssyncResult<(usize, SyncReport)> {
        self.ensure_open()?;
        let ids: BTreeSet<ImportId> = self.list_generated_import_ids().into_iter().collect();
        let target = self.spec.target_path();
        let current = self.fs.read(&target)?;
        let (text, removed) = marker_region::strip_floating_imports(&current, &ids);
        if removed > 0 {
            self.fs.write(&target, &text)?;
            tracing::info!(owner = %self.spec.owner_id, removed, "floating imports removed");
        }
        Ok((removed, self.sync_now()))
    }

    fn ensure_open(&self) -> ScssyncResult<()> {
        if self.status == EngineStatus::Closed {
            return Err(ScssyncError::WatcherClosed {
                owner: self.spec.owner_id.to_string(),
            });
        }
        Ok(())
    }
}

impl<F: FileSystem> std::fmt::Debug for SyncEngine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("owner", &self.spec.owner_id)
            .field("status", &self.status)
            .field("pending", &self.state.has_pending())
            .field("subscription", &self.subscription)
            .finish()
    }
}
