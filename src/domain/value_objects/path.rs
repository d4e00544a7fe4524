//! Path normalization
//!
//! Everything that compares paths (exclusion pruning, target detection,
//! root containment) goes through these helpers so that `foo/./bar`,
//! `foo/baz/../bar` and `foo\bar` all compare equal and `foobar` is never
//! mistaken for a child of `foo`.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Error when path validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path escapes the root boundary
    EscapesBoundary { path: PathBuf, root: PathBuf },
    /// Path is empty
    Empty,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::EscapesBoundary { path, root } => {
                write!(
                    f,
                    "Path '{}' escapes boundary '{}'",
                    path.display(),
                    root.display()
                )
            }
            PathError::Empty => write!(f, "Path is empty"),
        }
    }
}

impl std::error::Error for PathError {}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir => push_segment(&mut out, ".."),
            Component::Normal(part) => push_segment(&mut out, &part.to_string_lossy()),
        }
    }
    out
}

fn push_segment(out: &mut String, segment: &str) {
    if !out.is_empty() && !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(segment);
}

/// Resolve `.` and `..` without touching the file system.
///
/// A `..` that would climb above the start of a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// `path` equals `ancestor` or lies below it, on a separator boundary.
pub fn is_same_or_descendant(path: &Path, ancestor: &Path) -> bool {
    let path = to_slash(&normalize(path));
    let ancestor = to_slash(&normalize(ancestor));
    if path == ancestor {
        return true;
    }
    let ancestor = ancestor.trim_end_matches('/');
    path.strip_prefix(ancestor)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

/// `path` lies strictly below `ancestor`.
pub fn is_strict_descendant(path: &Path, ancestor: &Path) -> bool {
    is_same_or_descendant(path, ancestor) && normalize(path) != normalize(ancestor)
}

/// Join `relative` onto `root` and make sure the result stays inside `root`.
pub fn resolve_within(root: &Path, relative: &Path) -> Result<PathBuf, PathError> {
    if relative.as_os_str().is_empty() {
        return Err(PathError::Empty);
    }
    let joined = normalize(&root.join(relative));
    if !is_same_or_descendant(&joined, root) {
        return Err(PathError::EscapesBoundary {
            path: relative.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    Ok(joined)
}
