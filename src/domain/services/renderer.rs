//! Region body rendering
//!
//! Turns a discovery result into the exact lines placed between a
//! watcher's markers. Output is fully determined by the set of imports:
//! groups in `GroupKey` order (base group first), ids sorted within a group,
//! duplicates dropped.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::DiscoveredImport;
use crate::domain::value_objects::{GroupKey, ImportId};

fn grouped(imports: &[DiscoveredImport]) -> BTreeMap<&GroupKey, BTreeSet<&ImportId>> {
    let mut groups: BTreeMap<&GroupKey, BTreeSet<&ImportId>> = BTreeMap::new();
    for import in imports {
        groups
            .entry(&import.group_key)
            .or_default()
            .insert(&import.import_id);
    }
    // Each id renders once, under the first group that has it.
    let mut seen = BTreeSet::new();
    groups.retain(|_, ids| {
        ids.retain(|id| seen.insert(*id));
        !ids.is_empty()
    });
    groups
}

/// Body lines for a region
pub fn render_body(imports: &[DiscoveredImport], group_headings: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (group, ids) in grouped(imports) {
        if group_headings {
            if let Some(heading) = group.heading() {
                lines.push(heading);
            }
        }
        lines.extend(ids.into_iter().map(ImportId::to_directive));
    }
    lines
}

/// Import ids in rendering order
pub fn ordered_ids(imports: &[DiscoveredImport]) -> Vec<ImportId> {
    grouped(imports)
        .into_values()
        .flatten()
        .cloned()
        .collect()
}
