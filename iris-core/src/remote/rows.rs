//! Row shapes of the hosted tables, as sent and received over the wire.
//!
//! Field names follow the remote schema (snake_case). Read rows tolerate
//! missing optional columns; write payloads omit what the client does not
//! own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{EntryType, MoodCategory, Privacy};

/// A row of the `mood_entries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntryRow {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    pub mood_category: MoodCategory,
    pub mood_score: i32,
    #[serde(default)]
    pub note_text: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub activities: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for `mood_entries`. The identifier is generated client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMoodEntryRow {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    pub mood_category: MoodCategory,
    pub mood_score: i32,
    pub note_text: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// A row of the `journal_entries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryRow {
    pub id: Uuid,
    pub user_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub entry_type: EntryType,
    pub privacy: Privacy,
    #[serde(default)]
    pub mood_at_time: Option<MoodCategory>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub word_count: Option<i32>,
    /// Storage object path of the uploaded recording.
    #[serde(default)]
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert and update payload for `journal_entries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJournalEntryRow {
    pub id: Uuid,
    pub user_id: String,
    pub title: Option<String>,
    pub content: String,
    pub entry_type: EntryType,
    pub privacy: Privacy,
    pub mood_at_time: Option<MoodCategory>,
    pub tags: Vec<String>,
    pub word_count: i32,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewMoodEntryRow {
    /// The row the service would hand back after inserting this payload.
    pub fn into_row(self) -> MoodEntryRow {
        MoodEntryRow {
            id: self.id,
            user_id: self.user_id,
            date: self.date,
            mood_category: self.mood_category,
            mood_score: self.mood_score,
            note_text: Some(self.note_text),
            tags: Some(self.tags),
            activities: self.activities,
            created_at: self.created_at,
            updated_at: Some(self.created_at),
        }
    }
}

impl NewJournalEntryRow {
    pub fn into_row(self) -> JournalEntryRow {
        JournalEntryRow {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            entry_type: self.entry_type,
            privacy: self.privacy,
            mood_at_time: self.mood_at_time,
            tags: Some(self.tags),
            word_count: Some(self.word_count),
            audio_url: self.audio_url,
            created_at: self.created_at,
            updated_at: Some(self.updated_at),
        }
    }
}
