//! Discovered import entity

use std::path::PathBuf;

use crate::domain::value_objects::{GroupKey, ImportId};

/// One qualifying `.scss` file found during a discovery pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredImport {
    /// Absolute path of the source file
    pub source_path: PathBuf,
    pub import_id: ImportId,
    pub group_key: GroupKey,
}

impl DiscoveredImport {
    pub fn new(source_path: PathBuf, import_id: ImportId, group_key: GroupKey) -> Self {
        Self {
            source_path,
            import_id,
            group_key,
        }
    }
}
