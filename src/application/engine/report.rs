//! Sync results

use std::path::PathBuf;

use crate::domain::services::{MarkerFault, RegionAction};
use crate::domain::value_objects::{ImportId, OwnerId};

/// What a single sync pass did to the target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The target was rewritten
    Written(RegionAction),
    /// The region already matched; nothing was written
    Unchanged,
    /// Reading or writing the target failed; the file was left as it was
    Failed(String),
}

/// Result of one sync pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub owner: OwnerId,
    /// Ids rendered into the region, in render order
    pub imports: Vec<ImportId>,
    /// Files found but not importable
    pub skipped: usize,
    pub outcome: SyncOutcome,
    /// Malformed markers that were left in place
    pub fault: Option<MarkerFault>,
}

impl SyncReport {
    /// Check if sync was successful
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, SyncOutcome::Failed(_))
    }

    /// Whether the target file was rewritten
    pub fn wrote(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Written(_))
    }
}

/// What one `pump` call produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tick {
    /// Distinct paths that triggered the sync below
    pub changed: Vec<PathBuf>,
    pub report: Option<SyncReport>,
}

impl Tick {
    pub fn is_idle(&self) -> bool {
        self.report.is_none()
    }
}
