//! ChangeObserver implementations

mod noop;
mod notify_backend;

pub use noop::NoopObserver;
pub use notify_backend::NotifyObserver;
