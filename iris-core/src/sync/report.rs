use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::state::SyncState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushReport {
    /// Records created remotely.
    pub created: usize,
    /// Records whose day already had a remote counterpart.
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullReport {
    pub fetched: usize,
    pub inserted: usize,
    /// Remote records ignored because the day already exists locally.
    pub kept_local: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Days now holding the remote copy.
    pub remote: usize,
    /// Local records with no remote counterpart, kept as they were.
    pub local_only: usize,
    pub total: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FullSyncReport {
    pub push: PushReport,
    pub pull: PullReport,
}

impl FullSyncReport {
    pub fn has_errors(&self) -> bool {
        !self.push.errors.is_empty() || !self.pull.errors.is_empty()
    }
}

/// Result of a local-first write. The local write always succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Cloud sync is off or nobody is signed in.
    LocalOnly,
    Synced { remote_id: Uuid },
    /// The remote write failed; the record stays pending.
    SyncPending { error: String },
}

impl WriteOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, WriteOutcome::Synced { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncStats {
    pub state: SyncState,
    pub signed_in_user: Option<String>,
    pub cloud_sync_enabled: bool,
    pub background_sync_enabled: bool,
    pub migration_completed: bool,
    pub last_full_sync: Option<DateTime<Utc>>,
    pub last_incremental_sync: Option<DateTime<Utc>>,
    pub moods: usize,
    pub journals: usize,
    pub synced: usize,
    pub pending: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_report_errors() {
        let mut report = FullSyncReport::default();
        assert!(!report.has_errors());

        report.pull.errors.push("offline".into());
        assert!(report.has_errors());
    }

    #[test]
    fn test_write_outcome_json() {
        let outcome = WriteOutcome::SyncPending {
            error: "timeout".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "sync_pending");
        assert_eq!(json["error"], "timeout");
        assert!(!outcome.is_synced());
    }
}
