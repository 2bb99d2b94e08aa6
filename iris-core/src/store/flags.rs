use chrono::{DateTime, Utc};

use super::{LocalStore, StoreError};

/// Boolean preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    CloudSyncEnabled,
    BackgroundSyncEnabled,
    MigrationCompleted,
}

impl Flag {
    pub fn key(&self) -> &'static str {
        match self {
            Flag::CloudSyncEnabled => "cloud_sync_enabled",
            Flag::BackgroundSyncEnabled => "background_sync_enabled",
            Flag::MigrationCompleted => "migration_completed",
        }
    }
}

/// Timestamp-valued preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFlag {
    LastFullSync,
    LastIncrementalSync,
    MigrationCompleted,
}

impl DateFlag {
    pub fn key(&self) -> &'static str {
        match self {
            DateFlag::LastFullSync => "last_full_sync_date",
            DateFlag::LastIncrementalSync => "last_incremental_sync_marker",
            DateFlag::MigrationCompleted => "migration_completed_date",
        }
    }
}

impl LocalStore {
    /// Absent or unreadable flags read as `false`.
    pub async fn flag(&self, flag: Flag) -> Result<bool, StoreError> {
        Ok(match self.preference(flag.key()).await?.as_deref() {
            None => false,
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                tracing::warn!(key = flag.key(), value = other, "Ignoring unreadable flag");
                false
            }
        })
    }

    pub async fn set_flag(&self, flag: Flag, value: bool) -> Result<(), StoreError> {
        self.set_preference(flag.key(), if value { "true" } else { "false" })
            .await
    }

    pub async fn date_flag(&self, flag: DateFlag) -> Result<Option<DateTime<Utc>>, StoreError> {
        let Some(raw) = self.preference(flag.key()).await? else {
            return Ok(None);
        };
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(date) => Ok(Some(date.with_timezone(&Utc))),
            Err(e) => {
                tracing::warn!(key = flag.key(), error = %e, "Ignoring unreadable date flag");
                Ok(None)
            }
        }
    }

    pub async fn set_date_flag(&self, flag: DateFlag, value: DateTime<Utc>) -> Result<(), StoreError> {
        self.set_preference(flag.key(), &value.to_rfc3339()).await
    }

    pub async fn clear_date_flag(&self, flag: DateFlag) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM preferences WHERE key = ?")
            .bind(flag.key())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn preference(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.0))
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO preferences (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
