//! In-memory and dry-run file systems

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

use super::LocalFs;

/// Purely in-memory file system
///
/// Clones share the same files. Paths registered with `fail_writes_to`
/// reject writes, which is how tests simulate an unwritable target.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    read_only: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.lock().insert(path.into(), content.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.lock().get(path).cloned()
    }

    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.read_only
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(path.into());
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.get(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let denied = self
            .read_only
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .any(|p| p == path);
        if denied {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        self.insert(path, content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.lock();
        files.contains_key(path) || files.keys().any(|p| p.starts_with(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }
}

/// Reads from disk, keeps writes in memory
///
/// Used by `sync --dry-run` to compute what would be written without
/// touching the target file.
#[derive(Debug, Clone, Default)]
pub struct DryRunFs {
    disk: LocalFs,
    pending: MemoryFs,
}

impl DryRunFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files that would have been written, with their new content
    pub fn pending_writes(&self) -> BTreeMap<PathBuf, String> {
        self.pending.lock().clone()
    }
}

impl FileSystem for DryRunFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        match self.pending.get(path) {
            Some(content) => Ok(content),
            None => self.disk.read(path),
        }
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.pending.write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.pending.is_file(path) || self.disk.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.pending.is_file(path) || self.disk.is_file(path)
    }
}
