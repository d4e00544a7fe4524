//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{FilePolicy, ImportBase, WatcherSpec, DEFAULT_DEBOUNCE_MS};
use crate::domain::value_objects::{path, OwnerId};
use crate::error::{ScssyncError, ScssyncResult};

use super::loader::{self, ConfigWarning};

/// Project configuration (`scssync.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Base directory of every other path; relative values are resolved
    /// against the directory holding the config file
    pub root_dir: PathBuf,

    /// Stylesheet receiving the generated regions, relative to `rootDir`
    pub target_file: PathBuf,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_nested_target: bool,

    #[serde(default)]
    pub watchers: BTreeMap<String, WatcherConfig>,

    /// File this configuration was loaded from
    #[serde(skip)]
    pub source: PathBuf,
}

/// One entry of `watchers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatcherConfig {
    /// Directory to scan, relative to `rootDir`
    pub watch_dir: PathBuf,

    #[serde(default = "default_insertion_line")]
    pub insertion_line: usize,

    /// Defaults to the last segment of `watchDir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    /// Extra subtrees to skip, relative to `rootDir` or absolute
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_subtrees: Vec<PathBuf>,

    #[serde(default)]
    pub import_base: ImportBase,

    #[serde(default)]
    pub file_policy: FilePolicy,

    #[serde(default = "default_true")]
    pub group_headings: bool,

    /// Per-watcher target overriding the project's `targetFile`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_file: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_insertion_line() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !value
}

impl WatcherConfig {
    pub fn new(watch_dir: impl Into<PathBuf>) -> Self {
        Self {
            watch_dir: watch_dir.into(),
            insertion_line: default_insertion_line(),
            owner_id: None,
            exclude_subtrees: Vec::new(),
            import_base: ImportBase::default(),
            file_policy: FilePolicy::default(),
            group_headings: true,
            target_file: None,
        }
    }
}

impl ProjectConfig {
    pub fn new(root_dir: impl Into<PathBuf>, target_file: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            target_file: target_file.into(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            allow_nested_target: false,
            watchers: BTreeMap::new(),
            source: PathBuf::new(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ScssyncResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration from file, returning warnings for unknown keys
    pub fn load_with_warnings(path: &Path) -> ScssyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> ScssyncResult<()> {
        loader::save(self, path)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn invalid(&self, message: String) -> ScssyncError {
        ScssyncError::InvalidConfig {
            file: self.source.clone(),
            message,
        }
    }

    /// Build the engine spec of one watcher
    pub fn watcher_spec(&self, name: &str) -> ScssyncResult<WatcherSpec> {
        let watcher = self
            .watchers
            .get(name)
            .ok_or_else(|| ScssyncError::UnknownWatcher {
                name: name.to_string(),
            })?;
        if watcher.insertion_line == 0 {
            return Err(self.invalid(format!(
                "watchers.{name}.insertionLine must be 1 or greater"
            )));
        }

        let target = watcher.target_file.as_ref().unwrap_or(&self.target_file);
        let spec = match &watcher.owner_id {
            Some(owner) => {
                let owner = OwnerId::new(owner.as_str())
                    .map_err(|e| self.invalid(format!("watchers.{name}.ownerId: {e}")))?;
                WatcherSpec::owned_by(&self.root_dir, &watcher.watch_dir, target, owner)
            }
            None => WatcherSpec::new(&self.root_dir, &watcher.watch_dir, target).map_err(|e| {
                self.invalid(format!("watchers.{name}.watchDir: {e}; set ownerId"))
            })?,
        };

        let exclusions = watcher
            .exclude_subtrees
            .iter()
            .map(|p| path::normalize(&self.root_dir.join(p)))
            .collect();

        Ok(spec
            .with_insertion_line(watcher.insertion_line)
            .with_exclusions(exclusions)
            .with_import_base(watcher.import_base)
            .with_file_policy(watcher.file_policy)
            .with_group_headings(watcher.group_headings)
            .with_allow_nested_target(self.allow_nested_target)
            .with_debounce(self.debounce()))
    }

    /// Specs of every watcher, in name order
    pub fn watcher_specs(&self) -> ScssyncResult<Vec<(String, WatcherSpec)>> {
        self.watchers
            .keys()
            .map(|name| Ok((name.clone(), self.watcher_spec(name)?)))
            .collect()
    }
}
