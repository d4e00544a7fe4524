//! Cross-watcher exclusion
//!
//! A watcher must not import files that belong to a watcher nested inside
//! its directory. For every pair (A, B) where B's watch directory is a
//! strict descendant of A's, B's directory lands in A's exclusion set. Every
//! nested descendant counts, not just direct children, so one edit can
//! change the sets of many watchers.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::domain::value_objects::path;

/// Exclusion set for every key of `watch_dirs` (absolute paths).
///
/// Keys with nothing nested below them map to an empty set.
pub fn compute<K: Ord + Clone>(watch_dirs: &BTreeMap<K, PathBuf>) -> BTreeMap<K, BTreeSet<PathBuf>> {
    watch_dirs
        .iter()
        .map(|(key, dir)| {
            let nested = watch_dirs
                .iter()
                .filter(|(other, _)| *other != key)
                .filter(|(_, other_dir)| path::is_strict_descendant(other_dir, dir))
                .map(|(_, other_dir)| path::normalize(other_dir))
                .collect();
            (key.clone(), nested)
        })
        .collect()
}
