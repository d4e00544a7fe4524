//! Common test utilities for scssync CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the binary
//! - Fixtures: Reusable config and target file content

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
