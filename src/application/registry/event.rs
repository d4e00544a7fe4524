//! Watch event types

use serde::Serialize;

use crate::application::engine::{SyncOutcome, SyncReport};
use crate::domain::services::RegionAction;

/// Poll interval of the registry loop in milliseconds
pub const TICK_MS: u64 = 25;

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        root: String,
        watchers: Vec<String>,
    },
    /// File changed under a watcher's directory
    FileChanged { watcher: String, path: String },
    /// A watcher's region was synchronized
    SyncComplete {
        watcher: String,
        imports: usize,
        skipped: usize,
        action: &'static str,
    },
    /// Malformed markers were found and left in place
    MarkerWarning { watcher: String, message: String },
    /// Error occurred
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        watcher: Option<String>,
        message: String,
    },
    /// Watch stopped
    Shutdown { cleaned: bool },
}

impl WatchEvent {
    /// Events describing one sync report
    pub fn from_report(watcher: &str, report: &SyncReport) -> Vec<WatchEvent> {
        let mut events = Vec::new();
        if let Some(fault) = report.fault {
            events.push(WatchEvent::MarkerWarning {
                watcher: watcher.to_string(),
                message: fault.to_string(),
            });
        }
        let action = match &report.outcome {
            SyncOutcome::Written(RegionAction::Inserted) => "inserted",
            SyncOutcome::Written(_) => "replaced",
            SyncOutcome::Unchanged => "unchanged",
            SyncOutcome::Failed(message) => {
                events.push(WatchEvent::Error {
                    watcher: Some(watcher.to_string()),
                    message: message.clone(),
                });
                return events;
            }
        };
        events.push(WatchEvent::SyncComplete {
            watcher: watcher.to_string(),
            imports: report.imports.len(),
            skipped: report.skipped,
            action,
        });
        events
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
