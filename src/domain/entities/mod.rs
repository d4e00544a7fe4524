//! Domain Entities
//!
//! - `WatcherSpec` - configuration of one watcher
//! - `DiscoveredImport` - a qualifying source file found by a discovery pass

mod discovered_import;
mod watcher_spec;

pub use discovered_import::DiscoveredImport;
pub use watcher_spec::{FilePolicy, ImportBase, WatcherSpec, DEFAULT_DEBOUNCE_MS};
