use chrono::{DateTime, NaiveDate, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use std::collections::BTreeSet;
use std::path::PathBuf;
use uuid::Uuid;

use super::{LocalStore, StoreError};
use crate::models::{MoodCategory, MoodEntry};

#[derive(sqlx::FromRow)]
struct MoodRow {
    id: String,
    day: String,
    mood_category: String,
    mood_score: i64,
    note_text: String,
    tags: String,
    activities: String,
    voice_recording_path: Option<String>,
    voice_recording_duration: Option<f64>,
    created_at: String,
    updated_at: String,
}

const MOOD_COLUMNS: &str = "id, day, mood_category, mood_score, note_text, tags, activities, \
     voice_recording_path, voice_recording_duration, created_at, updated_at";

const MOOD_VALUES: &str = "VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const MOOD_UPDATE_SET: &str = "day = excluded.day, \
     mood_category = excluded.mood_category, \
     mood_score = excluded.mood_score, \
     note_text = excluded.note_text, \
     tags = excluded.tags, \
     activities = excluded.activities, \
     voice_recording_path = excluded.voice_recording_path, \
     voice_recording_duration = excluded.voice_recording_duration, \
     created_at = excluded.created_at, \
     updated_at = excluded.updated_at";

impl MoodRow {
    fn from_entry(entry: &MoodEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            day: entry.date.to_string(),
            mood_category: entry.category.to_string(),
            mood_score: i64::from(entry.score),
            note_text: entry.note.clone(),
            tags: encode_set(&entry.tags),
            activities: encode_set(&entry.activities),
            voice_recording_path: entry
                .voice_recording_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            voice_recording_duration: entry.voice_recording_duration,
            created_at: entry.created_at.to_rfc3339(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }

    fn bind<'q>(
        self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(self.id)
            .bind(self.day)
            .bind(self.mood_category)
            .bind(self.mood_score)
            .bind(self.note_text)
            .bind(self.tags)
            .bind(self.activities)
            .bind(self.voice_recording_path)
            .bind(self.voice_recording_duration)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    /// `None` when the identifying columns cannot be decoded.
    fn hydrate(self) -> Option<MoodEntry> {
        let id = Uuid::parse_str(&self.id).ok();
        let date = NaiveDate::parse_from_str(&self.day, "%Y-%m-%d").ok();
        let category = self.mood_category.parse::<MoodCategory>().ok();

        let (Some(id), Some(date), Some(category)) = (id, date, category) else {
            tracing::warn!(id = %self.id, day = %self.day, "Skipping unreadable mood entry");
            return None;
        };

        Some(MoodEntry {
            id,
            date,
            category,
            score: self.mood_score.clamp(1, 10) as u8,
            note: self.note_text,
            tags: decode_set(&self.tags),
            activities: decode_set(&self.activities),
            voice_recording_path: self.voice_recording_path.map(PathBuf::from),
            voice_recording_duration: self.voice_recording_duration,
            created_at: parse_timestamp(&self.created_at),
            updated_at: parse_timestamp(&self.updated_at),
        })
    }
}

pub(super) fn encode_set(set: &BTreeSet<String>) -> String {
    serde_json::to_string(set).unwrap_or_else(|_| "[]".to_string())
}

pub(super) fn decode_set(raw: &str) -> BTreeSet<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable tag list");
        BTreeSet::new()
    })
}

pub(super) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}

impl LocalStore {
    /// Every mood entry, newest day first.
    pub async fn load_all_moods(&self) -> Result<Vec<MoodEntry>, StoreError> {
        let rows: Vec<MoodRow> = sqlx::query_as(&format!(
            "SELECT {} FROM mood_entries ORDER BY day DESC",
            MOOD_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(MoodRow::hydrate).collect())
    }

    /// Entries with `from <= day <= to`, newest day first.
    pub async fn moods_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MoodEntry>, StoreError> {
        let rows: Vec<MoodRow> = sqlx::query_as(&format!(
            "SELECT {} FROM mood_entries WHERE day >= ? AND day <= ? ORDER BY day DESC",
            MOOD_COLUMNS
        ))
        .bind(from.to_string())
        .bind(to.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(MoodRow::hydrate).collect())
    }

    pub async fn mood_for_day(&self, day: NaiveDate) -> Result<Option<MoodEntry>, StoreError> {
        let row: Option<MoodRow> = sqlx::query_as(&format!(
            "SELECT {} FROM mood_entries WHERE day = ?",
            MOOD_COLUMNS
        ))
        .bind(day.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(MoodRow::hydrate))
    }

    pub async fn count_moods(&self) -> Result<usize, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mood_entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    /// Overwrites the whole collection. When two entries share a day the
    /// later one wins.
    pub async fn save_all_moods(&self, entries: &[MoodEntry]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM mood_entries")
            .execute(&mut *tx)
            .await?;

        let sql = format!(
            "INSERT INTO mood_entries ({}) {} ON CONFLICT(day) DO UPDATE SET id = excluded.id, {}",
            MOOD_COLUMNS, MOOD_VALUES, MOOD_UPDATE_SET
        );
        for entry in entries {
            MoodRow::from_entry(entry)
                .bind(sqlx::query(&sql))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Makes `entry` the mood of its day, replacing whatever was there.
    ///
    /// Returns the id of the replaced entry when it was a different record;
    /// that record's sync status goes with it. A pending sync status is
    /// created for `entry` if it has none.
    pub async fn replace_mood_for_day(&self, entry: &MoodEntry) -> Result<Option<Uuid>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = entry.id.to_string();

        let existing: Option<(String,)> =
            sqlx::query_as("SELECT id FROM mood_entries WHERE day = ? AND id != ?")
                .bind(entry.date.to_string())
                .bind(&id)
                .fetch_optional(&mut *tx)
                .await?;

        if let Some((old_id,)) = &existing {
            sqlx::query("DELETE FROM mood_entries WHERE id = ?")
                .bind(old_id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM sync_status WHERE record_id = ?")
                .bind(old_id)
                .execute(&mut *tx)
                .await?;
        }

        let sql = format!(
            "INSERT INTO mood_entries ({}) {} ON CONFLICT(id) DO UPDATE SET {}",
            MOOD_COLUMNS, MOOD_VALUES, MOOD_UPDATE_SET
        );
        MoodRow::from_entry(entry)
            .bind(sqlx::query(&sql))
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT OR IGNORE INTO sync_status (record_id, is_synced) VALUES (?, 0)")
            .bind(&id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(existing.and_then(|(old,)| Uuid::parse_str(&old).ok()))
    }

    /// Inserts `entry` only if its day (and id) are free. Returns whether it
    /// was inserted.
    pub async fn insert_mood_if_day_absent(&self, entry: &MoodEntry) -> Result<bool, StoreError> {
        let sql = format!(
            "INSERT INTO mood_entries ({}) {} ON CONFLICT DO NOTHING",
            MOOD_COLUMNS, MOOD_VALUES
        );
        let result = MoodRow::from_entry(entry)
            .bind(sqlx::query(&sql))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Returns whether an entry was deleted.
    pub async fn delete_mood(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = id.to_string();

        let result = sqlx::query("DELETE FROM mood_entries WHERE id = ?")
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
