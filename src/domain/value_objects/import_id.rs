//! Import identifiers
//!
//! An import id is the literal string placed inside `@import "…";`. It is
//! derived from a partial's path: separators become `/`, the `.scss` suffix
//! goes, and one leading `_` is dropped from the final segment only.

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

const SCSS_SUFFIX: &str = ".scss";
const INDEX_FILE: &str = "index.scss";

/// Why a path could not be turned into an import id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportIdError {
    #[error("not an .scss file: {0}")]
    NotScss(String),

    #[error("file name reduces to an empty import id: {0}")]
    EmptySegment(String),

    #[error("index.scss directly in the base directory has no directory to import: {0}")]
    RootIndex(String),

    #[error("file is not below the import base: {0}")]
    OutsideBase(String),
}

/// Canonical `@import` identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportId(String);

impl ImportId {
    /// Derive the id of a partial from its path relative to the import base.
    pub fn from_partial(relative: &Path) -> Result<Self, ImportIdError> {
        let (dirs, file) = split_segments(relative);
        let display = join(&dirs, Some(file.as_str()));

        let stem = file
            .strip_suffix(SCSS_SUFFIX)
            .ok_or_else(|| ImportIdError::NotScss(display.clone()))?;
        let stem = stem.strip_prefix('_').unwrap_or(stem);
        if stem.is_empty() {
            return Err(ImportIdError::EmptySegment(display));
        }

        Ok(Self(join(&dirs, Some(stem))))
    }

    /// Derive the id of an `index.scss`: the directory that contains it.
    pub fn from_index(relative: &Path) -> Result<Self, ImportIdError> {
        let (dirs, file) = split_segments(relative);
        let display = join(&dirs, Some(file.as_str()));
        if file != INDEX_FILE {
            return Err(ImportIdError::NotScss(display));
        }
        if dirs.is_empty() {
            return Err(ImportIdError::RootIndex(display));
        }
        Ok(Self(join(&dirs, None)))
    }

    /// Whether `file_name` is an index file
    pub fn is_index(file_name: &str) -> bool {
        file_name == INDEX_FILE
    }

    /// Construct from an already-canonical string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `@import` directive for this id
    pub fn to_directive(&self) -> String {
        format!("@import \"{}\";", self.0)
    }

    /// Parse an `@import "…";` line back into its id
    pub fn from_directive(line: &str) -> Option<Self> {
        let inner = line
            .trim()
            .strip_prefix("@import \"")?
            .strip_suffix("\";")?;
        if inner.is_empty() || inner.contains('"') {
            return None;
        }
        Some(Self(inner.to_string()))
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Grouping label used for sub-headings inside a rendered block.
///
/// `Base` sorts before every named group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// Files directly inside the watch directory; rendered without a heading
    Base,
    /// First directory segment below the watch directory
    Named(String),
}

impl GroupKey {
    /// Group of a file from its path relative to the watch directory
    pub fn for_path(relative_to_watch_dir: &Path) -> Self {
        let (dirs, _) = split_segments(relative_to_watch_dir);
        match dirs.into_iter().next() {
            Some(first) => GroupKey::Named(first),
            None => GroupKey::Base,
        }
    }

    pub fn heading(&self) -> Option<String> {
        match self {
            GroupKey::Base => None,
            GroupKey::Named(name) => Some(format!("/* {} */", name)),
        }
    }
}

fn split_segments(path: &Path) -> (Vec<String>, String) {
    let mut segments: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let file = segments.pop().unwrap_or_default();
    (segments, file)
}

fn join(dirs: &[String], last: Option<&str>) -> String {
    let mut parts: Vec<&str> = dirs.iter().map(String::as_str).collect();
    if let Some(last) = last {
        parts.push(last);
    }
    parts.join("/")
}
