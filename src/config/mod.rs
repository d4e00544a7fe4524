//! Configuration module for scssync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SCSSYNC_*)
//! 3. Project config (`scssync.json`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_overrides, resolve_path, with_env_overrides, ConfigWarning, CONFIG_ENV, CONFIG_FILE,
    DEBOUNCE_ENV,
};
pub use types::{ProjectConfig, WatcherConfig};
