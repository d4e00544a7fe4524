//! Watcher registry

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::application::engine::{EngineStatus, SyncEngine, SyncReport, Tick};
use crate::domain::entities::WatcherSpec;
use crate::domain::ports::{ChangeObserver, Clock, FileSystem};
use crate::domain::services::{exclusion, RegionAction};
use crate::domain::value_objects::{path, ImportId};
use crate::error::{ScssyncError, ScssyncResult};

use super::event::{WatchEvent, TICK_MS};

/// What happens to a watcher's region when it goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cleanup {
    /// Leave markers and body in place
    #[default]
    KeepMarkers,
    /// Delete the markers, leave the imports as plain lines
    KeepBody,
    /// Delete markers and body
    DeleteBody,
}

/// Per-watcher results of a registry operation
pub type Reports = Vec<(String, SyncReport)>;

/// All engines of a project, keyed by watcher name.
///
/// The registry is the single thread of control for its engines: every sync
/// runs from one of its methods, one engine at a time.
pub struct WatcherRegistry<F: FileSystem + Clone, O: ChangeObserver> {
    fs: F,
    observer: O,
    engines: BTreeMap<String, SyncEngine<F>>,
    /// `excludeSubtrees` as configured, before nested watchers are added
    configured: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl<F: FileSystem + Clone, O: ChangeObserver> WatcherRegistry<F, O> {
    pub fn new(fs: F, observer: O) -> Self {
        Self {
            fs,
            observer,
            engines: BTreeMap::new(),
            configured: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.engines.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> ScssyncResult<&SyncEngine<F>> {
        self.engines
            .get(name)
            .ok_or_else(|| ScssyncError::UnknownWatcher {
                name: name.to_string(),
            })
    }

    fn get_mut(&mut self, name: &str) -> ScssyncResult<&mut SyncEngine<F>> {
        self.engines
            .get_mut(name)
            .ok_or_else(|| ScssyncError::UnknownWatcher {
                name: name.to_string(),
            })
    }

    /// Start a new watcher and re-apply exclusions to everyone else.
    pub fn add(&mut self, name: &str, spec: WatcherSpec) -> ScssyncResult<Reports> {
        let mut dirs = self.watch_dirs();
        dirs.insert(name.to_string(), spec.watch_path());
        let report = self.start(name, spec, &dirs)?;

        let mut reports = vec![(name.to_string(), report)];
        reports.extend(self.apply_exclusions());
        Ok(reports)
    }

    /// Start several watchers with exclusions computed over all of them up
    /// front, so each one syncs exactly once.
    pub fn add_all(&mut self, specs: Vec<(String, WatcherSpec)>) -> ScssyncResult<Reports> {
        let mut dirs = self.watch_dirs();
        dirs.extend(
            specs
                .iter()
                .map(|(name, spec)| (name.clone(), spec.watch_path())),
        );

        let mut reports = Vec::with_capacity(specs.len());
        for (name, spec) in specs {
            let report = self.start(&name, spec, &dirs)?;
            reports.push((name, report));
        }
        reports.extend(self.apply_exclusions());
        Ok(reports)
    }

    fn start(
        &mut self,
        name: &str,
        spec: WatcherSpec,
        dirs: &BTreeMap<String, PathBuf>,
    ) -> ScssyncResult<SyncReport> {
        if self.engines.contains_key(name) {
            return Err(ScssyncError::DuplicateWatcher {
                name: name.to_string(),
            });
        }
        self.check_owner(name, &spec)?;

        let configured = normalized(&spec.exclude_subtrees);
        let mut exclusions = configured.clone();
        exclusions.extend(exclusion::compute(dirs).remove(name).unwrap_or_default());

        let (engine, report) =
            SyncEngine::create(spec.with_exclusions(exclusions), self.fs.clone(), &self.observer)?;
        tracing::info!(watcher = name, owner = %engine.owner(), "watcher added");
        self.engines.insert(name.to_string(), engine);
        self.configured.insert(name.to_string(), configured);
        Ok(report)
    }

    /// Replace a watcher's spec.
    ///
    /// The old engine is closed. If the owner id or the target changes, its
    /// markers are removed and the body is left behind.
    pub fn edit(&mut self, name: &str, spec: WatcherSpec) -> ScssyncResult<Reports> {
        let old = self.get(name)?;
        let retarget =
            old.owner() != &spec.owner_id || old.spec().target_path() != spec.target_path();
        spec.validate(&self.fs)?;
        self.check_owner(name, &spec)?;

        let Some(mut old) = self.engines.remove(name) else {
            return Err(ScssyncError::UnknownWatcher {
                name: name.to_string(),
            });
        };
        self.configured.remove(name);
        old.close();
        if retarget {
            if let Err(e) = old.remove_markers(false) {
                tracing::warn!(watcher = name, error = %e, "could not remove old markers");
            }
        }
        tracing::debug!(watcher = name, retarget, "watcher edited");
        self.add(name, spec)
    }

    /// Stop a watcher, clean up its region as asked, and resync watchers
    /// that had been excluding its directory.
    pub fn remove(&mut self, name: &str, cleanup: Cleanup) -> ScssyncResult<Reports> {
        let Some(mut engine) = self.engines.remove(name) else {
            return Err(ScssyncError::UnknownWatcher {
                name: name.to_string(),
            });
        };
        self.configured.remove(name);
        engine.close();
        match cleanup {
            Cleanup::KeepMarkers => {}
            Cleanup::KeepBody => {
                engine.remove_markers(false)?;
            }
            Cleanup::DeleteBody => {
                engine.remove_markers(true)?;
            }
        }
        tracing::info!(watcher = name, ?cleanup, "watcher removed");
        Ok(self.apply_exclusions())
    }

    /// Recompute nested-watcher exclusions; resync every watcher whose set
    /// changed, one after another.
    pub fn apply_exclusions(&mut self) -> Reports {
        let computed = exclusion::compute(&self.watch_dirs());
        let mut reports = Vec::new();
        for (name, engine) in self.engines.iter_mut() {
            if engine.status() == EngineStatus::Closed {
                continue;
            }
            let mut set = self.configured.get(name).cloned().unwrap_or_default();
            set.extend(computed.get(name).cloned().unwrap_or_default());
            if engine.set_exclusions(set) && engine.status() == EngineStatus::Active {
                reports.push((name.clone(), engine.sync_now()));
            }
        }
        reports
    }

    pub fn pause(&mut self, name: &str) -> ScssyncResult<()> {
        self.get_mut(name)?.pause()
    }

    pub fn resume(&mut self, name: &str) -> ScssyncResult<SyncReport> {
        self.get_mut(name)?.resume()
    }

    pub fn list(&self, name: &str) -> ScssyncResult<Vec<ImportId>> {
        Ok(self.get(name)?.list_generated_import_ids())
    }

    pub fn rehome(&mut self, name: &str) -> ScssyncResult<(usize, SyncReport)> {
        self.get_mut(name)?.rehome()
    }

    /// Pump every engine once; returns the ticks that did something.
    pub fn pump_all(&mut self, now: std::time::Instant) -> Vec<(String, Tick)> {
        self.engines
            .iter_mut()
            .map(|(name, engine)| (name.clone(), engine.pump(now)))
            .filter(|(_, tick)| !tick.is_idle())
            .collect()
    }

    /// Drive every engine until `running` is cleared.
    pub fn run<C, E>(&mut self, clock: &C, running: &AtomicBool, on_event: E)
    where
        C: Clock,
        E: Fn(WatchEvent),
    {
        while running.load(Ordering::SeqCst) {
            for (name, tick) in self.pump_all(clock.now()) {
                for changed in &tick.changed {
                    on_event(WatchEvent::FileChanged {
                        watcher: name.clone(),
                        path: path::to_slash(changed),
                    });
                }
                if let Some(report) = &tick.report {
                    for event in WatchEvent::from_report(&name, report) {
                        on_event(event);
                    }
                }
            }
            std::thread::sleep(Duration::from_millis(TICK_MS));
        }
    }

    /// Close every engine, then apply `cleanup` to each region.
    pub fn shutdown(&mut self, cleanup: Cleanup) -> Vec<(String, ScssyncResult<RegionAction>)> {
        for engine in self.engines.values_mut() {
            engine.close();
        }
        let delete_body = match cleanup {
            Cleanup::KeepMarkers => return Vec::new(),
            Cleanup::KeepBody => false,
            Cleanup::DeleteBody => true,
        };
        self.engines
            .iter()
            .map(|(name, engine)| (name.clone(), engine.remove_markers(delete_body)))
            .collect()
    }

    fn watch_dirs(&self) -> BTreeMap<String, PathBuf> {
        self.engines
            .iter()
            .map(|(name, engine)| (name.clone(), engine.spec().watch_path()))
            .collect()
    }

    fn check_owner(&self, name: &str, spec: &WatcherSpec) -> ScssyncResult<()> {
        check_owner(
            self.engines
                .iter()
                .map(|(other, engine)| (other.as_str(), engine.spec())),
            name,
            spec,
        )
    }
}

/// Validated engines without observers, exclusions already applied.
///
/// One-shot commands use these: nothing is synced until asked.
pub fn detached_engines<F: FileSystem + Clone>(
    fs: F,
    specs: Vec<(String, WatcherSpec)>,
) -> ScssyncResult<BTreeMap<String, SyncEngine<F>>> {
    let dirs: BTreeMap<String, PathBuf> = specs
        .iter()
        .map(|(name, spec)| (name.clone(), spec.watch_path()))
        .collect();
    let mut computed = exclusion::compute(&dirs);

    let mut engines: BTreeMap<String, SyncEngine<F>> = BTreeMap::new();
    for (name, spec) in specs {
        check_owner(
            engines.iter().map(|(other, e)| (other.as_str(), e.spec())),
            &name,
            &spec,
        )?;
        let mut exclusions = normalized(&spec.exclude_subtrees);
        exclusions.extend(computed.remove(&name).unwrap_or_default());
        let engine = SyncEngine::detached(spec.with_exclusions(exclusions), fs.clone())?;
        engines.insert(name, engine);
    }
    Ok(engines)
}

fn check_owner<'a>(
    existing: impl Iterator<Item = (&'a str, &'a WatcherSpec)>,
    name: &str,
    spec: &WatcherSpec,
) -> ScssyncResult<()> {
    let target = spec.target_path();
    for (other, other_spec) in existing {
        if other != name
            && other_spec.owner_id == spec.owner_id
            && other_spec.target_path() == target
        {
            return Err(ScssyncError::DuplicateOwner {
                owner: spec.owner_id.to_string(),
                existing: other.to_string(),
            });
        }
    }
    Ok(())
}

fn normalized(paths: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
    paths.iter().map(|p| path::normalize(p)).collect()
}
