//! Watcher specification entity
//!
//! A `WatcherSpec` is the configuration unit the sync engine is created
//! from. It is owned by the configuration layer; the engine only reads it
//! (apart from `exclude_subtrees`, which orchestration recomputes).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::path::{self, PathError};
use crate::domain::value_objects::{OwnerId, OwnerIdError};
use crate::error::{ScssyncError, ScssyncResult};

/// Debounce window used when the configuration does not set one
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// What import ids are relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportBase {
    /// `styles/components/_card.scss` watched at `styles/components` → `card`
    #[default]
    WatchDir,
    /// `styles/components/_card.scss` → `styles/components/card`
    RootDir,
}

/// Which `.scss` files qualify for import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilePolicy {
    /// Only partials (basename starts with `_`)
    #[default]
    Partials,
    /// Partials, plain `.scss` files, and `index.scss` (imported as its directory)
    All,
}

/// Configuration of one watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherSpec {
    /// Absolute base for every relative path below
    pub root_dir: PathBuf,
    /// Subtree to scan, relative to `root_dir`
    pub watch_dir: PathBuf,
    /// File receiving the generated region, relative to `root_dir`
    pub target_file: PathBuf,
    /// Identity embedded in the marker pair
    pub owner_id: OwnerId,
    /// 1-indexed line where a missing region is seeded
    pub insertion_line: usize,
    /// Absolute paths pruned from discovery
    pub exclude_subtrees: BTreeSet<PathBuf>,
    pub import_base: ImportBase,
    pub file_policy: FilePolicy,
    /// Emit `/* group */` sub-headings
    pub group_headings: bool,
    /// Accept a target anywhere under `root_dir`, not just directly inside it
    pub allow_nested_target: bool,
    pub debounce: Duration,
}

impl WatcherSpec {
    /// Create a spec whose owner id defaults to the watch directory's basename
    pub fn new(
        root_dir: impl Into<PathBuf>,
        watch_dir: impl Into<PathBuf>,
        target_file: impl Into<PathBuf>,
    ) -> Result<Self, OwnerIdError> {
        let watch_dir = watch_dir.into();
        let owner_id = OwnerId::from_watch_dir(&watch_dir)?;
        Ok(Self::owned_by(root_dir, watch_dir, target_file, owner_id))
    }

    /// Create a spec with an explicit owner id
    pub fn owned_by(
        root_dir: impl Into<PathBuf>,
        watch_dir: impl Into<PathBuf>,
        target_file: impl Into<PathBuf>,
        owner_id: OwnerId,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            watch_dir: watch_dir.into(),
            target_file: target_file.into(),
            owner_id,
            insertion_line: 1,
            exclude_subtrees: BTreeSet::new(),
            import_base: ImportBase::default(),
            file_policy: FilePolicy::default(),
            group_headings: true,
            allow_nested_target: false,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    pub fn with_owner_id(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn with_insertion_line(mut self, line: usize) -> Self {
        self.insertion_line = line;
        self
    }

    pub fn with_exclusions(mut self, exclusions: BTreeSet<PathBuf>) -> Self {
        self.exclude_subtrees = exclusions;
        self
    }

    pub fn with_import_base(mut self, base: ImportBase) -> Self {
        self.import_base = base;
        self
    }

    pub fn with_file_policy(mut self, policy: FilePolicy) -> Self {
        self.file_policy = policy;
        self
    }

    pub fn with_group_headings(mut self, enabled: bool) -> Self {
        self.group_headings = enabled;
        self
    }

    pub fn with_allow_nested_target(mut self, allow: bool) -> Self {
        self.allow_nested_target = allow;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Absolute, normalized watch directory
    pub fn watch_path(&self) -> PathBuf {
        path::normalize(&self.root_dir.join(&self.watch_dir))
    }

    /// Absolute, normalized target file
    pub fn target_path(&self) -> PathBuf {
        path::normalize(&self.root_dir.join(&self.target_file))
    }

    /// Directory import ids are made relative to
    pub fn import_base_path(&self) -> PathBuf {
        match self.import_base {
            ImportBase::WatchDir => self.watch_path(),
            ImportBase::RootDir => path::normalize(&self.root_dir),
        }
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate<F: FileSystem + ?Sized>(&self, fs: &F) -> ScssyncResult<()> {
        if !self.root_dir.is_absolute() {
            return Err(ScssyncError::RootNotAbsolute {
                path: self.root_dir.clone(),
            });
        }

        let root = path::normalize(&self.root_dir);
        let target = path::resolve_within(&root, &self.target_file).map_err(|e| match e {
            PathError::Empty => ScssyncError::TargetNotFound {
                path: self.target_file.clone(),
            },
            PathError::EscapesBoundary { path, root } => {
                ScssyncError::TargetOutsideRoot { path, root }
            }
        })?;
        if !self.allow_nested_target && target.parent() != Some(root.as_path()) {
            return Err(ScssyncError::TargetInSubfolder { path: target, root });
        }
        if !fs.exists(&target) {
            return Err(ScssyncError::TargetNotFound { path: target });
        }
        if !fs.is_file(&target) {
            return Err(ScssyncError::TargetNotAFile { path: target });
        }

        if !self.watch_dir.as_os_str().is_empty() {
            path::resolve_within(&root, &self.watch_dir).map_err(|_| {
                ScssyncError::WatchDirOutsideRoot {
                    path: self.watch_dir.clone(),
                    root: root.clone(),
                }
            })?;
        }

        Ok(())
    }

    /// Whether `candidate` is this watcher's own target file
    pub fn is_target(&self, candidate: &Path) -> bool {
        path::normalize(candidate) == self.target_path()
    }
}
