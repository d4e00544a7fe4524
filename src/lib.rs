//! scssync - keeps generated SCSS `@import` blocks in sync with partial directories
//!
//! Each watcher scans one directory for partials, derives their import ids and
//! rewrites a marker-delimited region of a target stylesheet. Everything the
//! user wrote outside that region is preserved byte for byte.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    detached_engines, discover, Cleanup, SyncEngine, SyncOutcome, SyncReport, WatchEvent,
    WatcherRegistry,
};
pub use config::{ProjectConfig, WatcherConfig};
pub use domain::entities::{FilePolicy, ImportBase, WatcherSpec};
pub use domain::value_objects::{ImportId, OwnerId};
pub use error::{ScssyncError, ScssyncResult};
