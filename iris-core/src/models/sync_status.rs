use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-record sync bookkeeping kept next to the local copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub record_id: Uuid,
    pub is_synced: bool,
    pub last_sync_attempt: Option<DateTime<Utc>>,
    pub remote_id: Option<Uuid>,
    pub last_error: Option<String>,
}

impl SyncStatus {
    /// Status of a record that has only been written locally.
    pub fn pending(record_id: Uuid) -> Self {
        Self {
            record_id,
            is_synced: false,
            last_sync_attempt: None,
            remote_id: None,
            last_error: None,
        }
    }

    pub fn synced(record_id: Uuid, remote_id: Uuid) -> Self {
        Self {
            record_id,
            is_synced: true,
            last_sync_attempt: Some(Utc::now()),
            remote_id: Some(remote_id),
            last_error: None,
        }
    }

    pub fn failed(record_id: Uuid, error: impl Into<String>) -> Self {
        Self {
            record_id,
            is_synced: false,
            last_sync_attempt: Some(Utc::now()),
            remote_id: None,
            last_error: Some(error.into()),
        }
    }

    pub fn has_failed(&self) -> bool {
        !self.is_synced && self.last_error.is_some()
    }
}
