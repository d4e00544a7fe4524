//! Owner ids and the marker comments derived from them
//!
//! Marker syntax is a stable on-disk contract:
//!
//! ```text
//! /* <ownerId> import start */
//! /* <ownerId> import end */
//! ```

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

use super::path;

const MARKER_OPEN: &str = "/* ";
const START_SUFFIX: &str = " import start */";
const END_SUFFIX: &str = " import end */";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnerIdError {
    #[error("owner id is empty")]
    Empty,

    #[error("owner id '{0}' must not contain line breaks or '*/'")]
    InvalidCharacters(String),

    #[error("watch directory '{0}' has no name to derive an owner id from")]
    UnnamedWatchDir(String),
}

/// Identity embedded in a watcher's marker pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Result<Self, OwnerIdError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(OwnerIdError::Empty);
        }
        if trimmed.contains(['\n', '\r']) || trimmed.contains("*/") {
            return Err(OwnerIdError::InvalidCharacters(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Default owner: the last segment of the watch directory
    ///
    /// `.`/`..` segments are resolved first; a directory that resolves to
    /// nothing nameable (`.`, `..`, `/`) has no default owner.
    pub fn from_watch_dir(watch_dir: &Path) -> Result<Self, OwnerIdError> {
        match path::normalize(watch_dir).components().next_back() {
            Some(Component::Normal(name)) => Self::new(name.to_string_lossy()),
            _ => Err(OwnerIdError::UnnamedWatchDir(watch_dir.display().to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn start_marker(&self) -> String {
        format!("{MARKER_OPEN}{}{START_SUFFIX}", self.0)
    }

    pub fn end_marker(&self) -> String {
        format!("{MARKER_OPEN}{}{END_SUFFIX}", self.0)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which half of a marker pair a line is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

/// Recognise a marker line of any owner.
///
/// Returns the kind and the owner text embedded in it.
pub fn parse_marker_line(line: &str) -> Option<(MarkerKind, &str)> {
    let inner = line.trim().strip_prefix(MARKER_OPEN)?;
    if let Some(owner) = inner.strip_suffix(START_SUFFIX) {
        return (!owner.is_empty()).then_some((MarkerKind::Start, owner));
    }
    if let Some(owner) = inner.strip_suffix(END_SUFFIX) {
        return (!owner.is_empty()).then_some((MarkerKind::End, owner));
    }
    None
}
