//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports:
//!
//! - `fs` - local disk (atomic replace), in-memory and dry-run file systems
//! - `observer` - `notify`-backed and no-op change observers

pub mod fs;
pub mod observer;
