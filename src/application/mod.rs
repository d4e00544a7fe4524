//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `discover` - Walks a watch directory and derives import ids
//! - `SyncEngine` - One watcher: debounced discovery + region rewrite
//! - `WatcherRegistry` - All watchers of a project, exclusions, the watch loop

pub mod discover;
pub mod engine;
pub mod registry;

pub use discover::{discover, DiscoveryReport, SkippedFile};
pub use engine::{EngineStatus, SyncEngine, SyncOutcome, SyncReport, Tick, WatcherState};
pub use registry::{detached_engines, Cleanup, Reports, WatchEvent, WatcherRegistry, TICK_MS};
