//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod change_observer;
pub mod clock;
pub mod file_system;

pub use change_observer::{ChangeEvent, ChangeKind, ChangeObserver, Subscription};
pub use clock::{Clock, ManualClock, SystemClock};
pub use file_system::{FileSystem, FsError, FsResult};
