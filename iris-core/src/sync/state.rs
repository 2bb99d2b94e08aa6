use serde::Serialize;
use std::fmt;

/// Progress of the last tracked sync run. Held in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SyncState {
    #[default]
    Idle,
    Syncing,
    Completed,
    Failed(String),
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Idle => write!(f, "idle"),
            SyncState::Syncing => write!(f, "syncing"),
            SyncState::Completed => write!(f, "completed"),
            SyncState::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}
