//! Observer that never reports changes
//!
//! Registries built on it only sync when driven by hand: initial sync,
//! `resume`, exclusion changes. Tests and embedders use it.

use std::path::Path;
use std::sync::mpsc::Sender;

use crate::domain::ports::{ChangeEvent, ChangeObserver, Subscription};
use crate::error::ScssyncResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ChangeObserver for NoopObserver {
    fn subscribe(&self, _dir: &Path, mailbox: Sender<ChangeEvent>) -> ScssyncResult<Subscription> {
        let _ = mailbox.send(ChangeEvent::Ready);
        Ok(Subscription::detached())
    }
}
