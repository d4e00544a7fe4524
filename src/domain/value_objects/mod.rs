//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
pub mod import_id;
pub mod owner_id;
pub mod path;

pub use config_warning::ConfigWarning;
pub use import_id::{GroupKey, ImportId, ImportIdError};
pub use owner_id::{parse_marker_line, MarkerKind, OwnerId, OwnerIdError};
pub use path::PathError;
