use chrono::{Days, NaiveDate};
use std::path::PathBuf;
use uuid::Uuid;

use super::mood_repo::{decode_set, encode_set, parse_timestamp};
use super::{LocalStore, StoreError};
use crate::models::{JournalEntry, MoodCategory};

#[derive(sqlx::FromRow)]
struct JournalRow {
    id: String,
    title: Option<String>,
    content: String,
    entry_type: String,
    privacy: String,
    mood_at_time: Option<String>,
    tags: String,
    audio_path: Option<String>,
    created_at: String,
    updated_at: String,
}

const JOURNAL_COLUMNS: &str = "id, title, content, entry_type, privacy, mood_at_time, tags, \
     audio_path, created_at, updated_at";

impl JournalRow {
    fn hydrate(self) -> Option<JournalEntry> {
        let Ok(id) = Uuid::parse_str(&self.id) else {
            tracing::warn!(id = %self.id, "Skipping unreadable journal entry");
            return None;
        };

        Some(JournalEntry {
            id,
            title: self.title,
            content: self.content,
            entry_type: self.entry_type.parse().unwrap_or_default(),
            privacy: self.privacy.parse().unwrap_or_default(),
            mood_at_time: self
                .mood_at_time
                .and_then(|m| m.parse::<MoodCategory>().ok()),
            tags: decode_set(&self.tags),
            audio_path: self.audio_path.map(PathBuf::from),
            created_at: parse_timestamp(&self.created_at),
            updated_at: parse_timestamp(&self.updated_at),
        })
    }
}

impl LocalStore {
    /// Inserts or replaces the entry with the same id. A pending sync status
    /// is created if the entry has none.
    pub async fn upsert_journal(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = entry.id.to_string();

        sqlx::query(&format!(
            "INSERT INTO journal_entries ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                title = excluded.title, \
                content = excluded.content, \
                entry_type = excluded.entry_type, \
                privacy = excluded.privacy, \
                mood_at_time = excluded.mood_at_time, \
                tags = excluded.tags, \
                audio_path = excluded.audio_path, \
                updated_at = excluded.updated_at",
            JOURNAL_COLUMNS
        ))
        .bind(&id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.entry_type.to_string())
        .bind(entry.privacy.to_string())
        .bind(entry.mood_at_time.map(|m| m.to_string()))
        .bind(encode_set(&entry.tags))
        .bind(
            entry
                .audio_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )
        .bind(entry.created_at.to_rfc3339())
        .bind(entry.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT OR IGNORE INTO sync_status (record_id, is_synced) VALUES (?, 0)")
            .bind(&id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn journal_by_id(&self, id: Uuid) -> Result<Option<JournalEntry>, StoreError> {
        let row: Option<JournalRow> = sqlx::query_as(&format!(
            "SELECT {} FROM journal_entries WHERE id = ?",
            JOURNAL_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(JournalRow::hydrate))
    }

    /// Entries created on any day in `from..=to` (UTC), newest first.
    pub async fn journals_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalEntry>, StoreError> {
        let end = to
            .checked_add_days(Days::new(1))
            .map(|d| d.to_string())
            .unwrap_or_else(|| "9999-12-31T23:59:59".to_string());

        let rows: Vec<JournalRow> = sqlx::query_as(&format!(
            "SELECT {} FROM journal_entries WHERE created_at >= ? AND created_at < ? \
             ORDER BY created_at DESC",
            JOURNAL_COLUMNS
        ))
        .bind(from.to_string())
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(JournalRow::hydrate).collect())
    }

    pub async fn load_all_journals(&self) -> Result<Vec<JournalEntry>, StoreError> {
        let rows: Vec<JournalRow> = sqlx::query_as(&format!(
            "SELECT {} FROM journal_entries ORDER BY created_at DESC",
            JOURNAL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(JournalRow::hydrate).collect())
    }

    /// Returns whether an entry was deleted. Its sync status goes with it.
    pub async fn delete_journal(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = id.to_string();

        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sync_status WHERE record_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
