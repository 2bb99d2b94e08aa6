use std::collections::HashMap;
use uuid::Uuid;

use super::{LocalStore, StoreError};
use crate::models::SyncStatus;

#[derive(sqlx::FromRow)]
struct SyncStatusRow {
    record_id: String,
    is_synced: bool,
    last_sync_attempt: Option<String>,
    remote_id: Option<String>,
    last_error: Option<String>,
}

impl SyncStatusRow {
    fn hydrate(self) -> Option<SyncStatus> {
        let record_id = Uuid::parse_str(&self.record_id).ok()?;
        Some(SyncStatus {
            record_id,
            is_synced: self.is_synced,
            last_sync_attempt: self
                .last_sync_attempt
                .as_deref()
                .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
                .map(|d| d.with_timezone(&chrono::Utc)),
            remote_id: self.remote_id.and_then(|r| Uuid::parse_str(&r).ok()),
            last_error: self.last_error,
        })
    }
}

impl LocalStore {
    pub async fn sync_status(&self, record_id: Uuid) -> Result<Option<SyncStatus>, StoreError> {
        let row: Option<SyncStatusRow> = sqlx::query_as(
            "SELECT record_id, is_synced, last_sync_attempt, remote_id, last_error \
             FROM sync_status WHERE record_id = ?",
        )
        .bind(record_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(SyncStatusRow::hydrate))
    }

    /// Every known status keyed by record id.
    pub async fn sync_statuses(&self) -> Result<HashMap<Uuid, SyncStatus>, StoreError> {
        let rows: Vec<SyncStatusRow> = sqlx::query_as(
            "SELECT record_id, is_synced, last_sync_attempt, remote_id, last_error FROM sync_status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(SyncStatusRow::hydrate)
            .map(|s| (s.record_id, s))
            .collect())
    }

    pub async fn set_sync_status(&self, status: &SyncStatus) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO sync_status (record_id, is_synced, last_sync_attempt, remote_id, last_error) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(record_id) DO UPDATE SET \
                is_synced = excluded.is_synced, \
                last_sync_attempt = excluded.last_sync_attempt, \
                remote_id = excluded.remote_id, \
                last_error = excluded.last_error",
        )
        .bind(status.record_id.to_string())
        .bind(status.is_synced)
        .bind(status.last_sync_attempt.map(|d| d.to_rfc3339()))
        .bind(status.remote_id.map(|r| r.to_string()))
        .bind(&status.last_error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Marks every record as never synced. Returns how many were reset.
    pub async fn reset_sync_statuses(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE sync_status SET is_synced = 0, last_sync_attempt = NULL, \
             remote_id = NULL, last_error = NULL",
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
