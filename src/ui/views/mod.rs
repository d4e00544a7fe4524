pub mod clean;
pub mod list;
pub mod sync;
pub mod watch;
