//! Sync Engine
//!
//! One `SyncEngine` per watcher. It owns:
//! - The watcher's `WatcherSpec`
//! - A mailbox of `ChangeEvent`s fed by a `ChangeObserver`
//! - Debouncing (100ms default, restarted by every event)
//! - The rewrite of its own marker region in the target file
//!
//! Engines never run concurrently with each other; the registry drives
//! them one at a time, which is what keeps writes to a shared target file
//! from interleaving.
//!
//! ## Usage
//!
//! ```ignore
//! let (mut engine, initial) = SyncEngine::create(spec, LocalFs::new(), &NotifyObserver::new())?;
//! loop {
//!     let tick = engine.pump(clock.now());
//!     ...
//! }
//! ```

mod debounce;
mod report;
mod sync_engine;


pub use debounce::WatcherState;
pub use report::{SyncOutcome, SyncReport, Tick};
pub use sync_engine::{EngineStatus, SyncEngine};
