//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

pub mod exclusion;
pub mod marker_region;
pub mod renderer;

pub use marker_region::{Located, MarkerFault, RegionAction, Rewrite, Span};
pub use renderer::{ordered_ids, render_body};
