//! Domain Layer
//!
//! The core of scssync - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - `WatcherSpec`, `DiscoveredImport`
//! - `value_objects/` - import ids, owner ids and markers, path normalization
//! - `services/` - marker-region rewriting, body rendering, exclusion sets
//! - `ports/` - file system, change observer and clock interfaces
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless text/path transforms
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
