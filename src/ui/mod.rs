//! Terminal rendering for the CLI
//!
//! Views return strings; commands decide where they are printed.

pub mod blocks;
pub mod ci;
pub mod components;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
