//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod local;
mod memory;

pub use local::{atomic_write, LocalFs};
pub use memory::{DryRunFs, MemoryFs};
