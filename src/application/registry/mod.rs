//! Watcher registry
//!
//! Owns every `SyncEngine` of a project and keeps them consistent:
//! - Owner ids are unique per target file
//! - Nested watch directories are excluded from their ancestors
//! - Exclusions are recomputed on every add, edit and remove
//! - One loop drives all engines, so rewrites of a shared target never overlap
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = WatcherRegistry::new(LocalFs::new(), NotifyObserver::new());
//! registry.add("components", spec)?;
//! registry.run(&SystemClock, &running, |event| println!("{}", event.to_json()));
//! registry.shutdown(Cleanup::KeepMarkers);
//! ```

mod event;
mod watcher_registry;


pub use event::{WatchEvent, TICK_MS};
pub use watcher_registry::{detached_engines, Cleanup, Reports, WatcherRegistry};
