//! File discovery
//!
//! Walks a watcher's directory and turns every qualifying `.scss` file into
//! a `DiscoveredImport`. Excluded subtrees (nested watchers' territory) are
//! pruned before they are entered, and the watcher's own target file never
//! qualifies.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::entities::{DiscoveredImport, FilePolicy, WatcherSpec};
use crate::domain::value_objects::path;
use crate::domain::value_objects::{GroupKey, ImportId, ImportIdError};

/// A `.scss` file that was found but could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: ImportIdError,
}

/// Outcome of one discovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Qualifying imports, sorted by group then id, ids unique
    pub imports: Vec<DiscoveredImport>,
    pub skipped: Vec<SkippedFile>,
    /// The watch directory did not exist (treated as empty)
    pub missing_dir: bool,
}

impl DiscoveryReport {
    pub fn import_ids(&self) -> Vec<ImportId> {
        self.imports.iter().map(|i| i.import_id.clone()).collect()
    }
}

fn is_excluded(dir: &Path, exclusions: &[PathBuf]) -> bool {
    exclusions
        .iter()
        .any(|excluded| path::is_same_or_descendant(dir, excluded))
}

/// Run one discovery pass for `spec`.
pub fn discover(spec: &WatcherSpec) -> DiscoveryReport {
    let watch = spec.watch_path();
    let exclusions: Vec<PathBuf> = spec
        .exclude_subtrees
        .iter()
        .map(|p| path::normalize(p))
        .collect();

    if !watch.is_dir() {
        tracing::warn!(
            owner = %spec.owner_id,
            dir = %watch.display(),
            "watch directory does not exist; treating as empty"
        );
        return DiscoveryReport {
            missing_dir: true,
            ..Default::default()
        };
    }
    if is_excluded(&watch, &exclusions) {
        tracing::debug!(owner = %spec.owner_id, "watch directory is fully excluded");
        return DiscoveryReport::default();
    }

    let walker = {
        let exclusions = exclusions.clone();
        WalkBuilder::new(&watch)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && is_excluded(&path::normalize(entry.path()), &exclusions))
            })
            .build()
    };

    let base = spec.import_base_path();
    let mut report = DiscoveryReport::default();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(owner = %spec.owner_id, error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let file = path::normalize(entry.path());
        if !file.is_file() || spec.is_target(&file) {
            continue;
        }
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".scss") {
            continue;
        }

        let derived = match spec.file_policy {
            FilePolicy::Partials if !name.starts_with('_') => continue,
            FilePolicy::Partials => relative(&file, &base).and_then(|r| ImportId::from_partial(&r)),
            FilePolicy::All if ImportId::is_index(name) => {
                relative(&file, &base).and_then(|r| ImportId::from_index(&r))
            }
            FilePolicy::All => relative(&file, &base).and_then(|r| ImportId::from_partial(&r)),
        };

        match derived {
            Ok(import_id) => {
                let group_key = file
                    .strip_prefix(&watch)
                    .map(GroupKey::for_path)
                    .unwrap_or(GroupKey::Base);
                report
                    .imports
                    .push(DiscoveredImport::new(file, import_id, group_key));
            }
            Err(reason) => {
                tracing::warn!(
                    owner = %spec.owner_id,
                    file = %file.display(),
                    %reason,
                    "skipping file"
                );
                report.skipped.push(SkippedFile { path: file, reason });
            }
        }
    }

    report.imports.sort_by(|a, b| {
        (&a.group_key, &a.import_id).cmp(&(&b.group_key, &b.import_id))
    });
    // An id reachable from two groups keeps its first (base-most) entry.
    let mut seen = BTreeSet::new();
    report
        .imports
        .retain(|import| seen.insert(import.import_id.clone()));
    report
}

fn relative(file: &Path, base: &Path) -> Result<PathBuf, ImportIdError> {
    file.strip_prefix(base)
        .map(Path::to_path_buf)
        .map_err(|_| ImportIdError::OutsideBase(path::to_slash(file)))
}
