//! Error types for scssync
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for scssync operations
pub type ScssyncResult<T> = Result<T, ScssyncError>;

/// Main error type for scssync operations
#[derive(Error, Debug)]
pub enum ScssyncError {
    /// `rootDir` must be absolute so every other path can be resolved against it
    #[error("root directory must be an absolute path: {path}")]
    RootNotAbsolute { path: PathBuf },

    /// Target stylesheet does not exist
    #[error("target file not found: {path}")]
    TargetNotFound { path: PathBuf },

    /// Target exists but is a directory or special file
    #[error("target is not a regular file: {path}")]
    TargetNotAFile { path: PathBuf },

    /// Target resolves outside of the root directory
    #[error("target file '{path}' escapes root directory '{root}'")]
    TargetOutsideRoot { path: PathBuf, root: PathBuf },

    /// Target lives in a subfolder while nested targets are not allowed
    #[error("target file '{path}' must sit directly inside '{root}' (set allowNestedTarget to relax)")]
    TargetInSubfolder { path: PathBuf, root: PathBuf },

    /// Watch directory resolves outside of the root directory
    #[error("watch directory '{path}' escapes root directory '{root}'")]
    WatchDirOutsideRoot { path: PathBuf, root: PathBuf },

    /// Two watchers claim the same marker pair
    #[error("owner id '{owner}' is already used by watcher '{existing}'")]
    DuplicateOwner { owner: String, existing: String },

    /// A watcher with that name is already registered
    #[error("watcher '{name}' already exists")]
    DuplicateWatcher { name: String },

    /// No watcher registered under that name
    #[error("unknown watcher '{name}'")]
    UnknownWatcher { name: String },

    /// Operation on a watcher that has been closed
    #[error("watcher '{owner}' is closed")]
    WatcherClosed { owner: String },

    /// Malformed configuration record
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Change observer could not be started
    #[error("failed to watch {path}: {message}")]
    Observer { path: PathBuf, message: String },

    /// File system port error
    #[error("{0}")]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScssyncError {
    /// Configuration errors are rejected up front; everything else is transient.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::RootNotAbsolute { .. }
                | Self::TargetNotFound { .. }
                | Self::TargetNotAFile { .. }
                | Self::TargetOutsideRoot { .. }
                | Self::TargetInSubfolder { .. }
                | Self::WatchDirOutsideRoot { .. }
                | Self::DuplicateOwner { .. }
                | Self::DuplicateWatcher { .. }
                | Self::UnknownWatcher { .. }
                | Self::InvalidConfig { .. }
        )
    }
}
