use chrono::{NaiveDate, Utc};

use super::mood::{category_from_emoji, emoji_for, label_for, score_from_label, time_ago};
use crate::models::{JournalEntry, MoodDisplay, MoodEntry};
use crate::remote::{JournalEntryRow, MoodEntryRow, NewJournalEntryRow, NewMoodEntryRow};

/// Remote rows carry no voice attachment; the local copy gets none.
pub fn mood_from_row(row: &MoodEntryRow) -> MoodEntry {
    MoodEntry {
        id: row.id,
        date: row.date,
        category: row.mood_category,
        score: row.mood_score.clamp(1, 10) as u8,
        note: row.note_text.clone().unwrap_or_default(),
        tags: row.tags.iter().flatten().cloned().collect(),
        activities: row.activities.iter().flatten().cloned().collect(),
        voice_recording_path: None,
        voice_recording_duration: None,
        created_at: row.created_at,
        updated_at: row.updated_at.unwrap_or(row.created_at),
    }
}

pub fn mood_to_row(entry: &MoodEntry, user_id: &str) -> NewMoodEntryRow {
    NewMoodEntryRow {
        id: entry.id,
        user_id: user_id.to_string(),
        date: entry.date,
        mood_category: entry.category,
        mood_score: i32::from(entry.score),
        note_text: entry.note.clone(),
        tags: entry.tags.iter().cloned().collect(),
        activities: if entry.activities.is_empty() {
            None
        } else {
            Some(entry.activities.iter().cloned().collect())
        },
        created_at: entry.created_at,
    }
}

pub fn mood_to_display(entry: &MoodEntry, today: NaiveDate) -> MoodDisplay {
    MoodDisplay {
        id: entry.id,
        date: entry.date,
        emoji: emoji_for(entry.category).to_string(),
        label: label_for(entry.category).to_string(),
        note: entry.note.clone(),
        tags: entry.tags.iter().cloned().collect(),
        has_voice_note: entry.has_voice_recording(),
        time_ago: time_ago(entry.date, today),
    }
}

/// Category comes from the picked emoji, score from the label.
pub fn mood_from_display(display: &MoodDisplay) -> MoodEntry {
    let now = Utc::now();
    MoodEntry {
        id: display.id,
        date: display.date,
        category: category_from_emoji(&display.emoji),
        score: score_from_label(&display.label),
        note: display.note.clone(),
        tags: display.tags.iter().cloned().collect(),
        activities: Default::default(),
        voice_recording_path: None,
        voice_recording_duration: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn journal_from_row(row: &JournalEntryRow) -> JournalEntry {
    JournalEntry {
        id: row.id,
        title: row.title.clone(),
        content: row.content.clone(),
        entry_type: row.entry_type,
        privacy: row.privacy,
        mood_at_time: row.mood_at_time,
        tags: row.tags.iter().flatten().cloned().collect(),
        audio_path: None,
        created_at: row.created_at,
        updated_at: row.updated_at.unwrap_or(row.created_at),
    }
}

/// `audio_url` is the storage path of an already uploaded recording.
pub fn journal_to_row(
    entry: &JournalEntry,
    user_id: &str,
    audio_url: Option<String>,
) -> NewJournalEntryRow {
    NewJournalEntryRow {
        id: entry.id,
        user_id: user_id.to_string(),
        title: entry.title.clone(),
        content: entry.content.clone(),
        entry_type: entry.entry_type,
        privacy: entry.privacy,
        mood_at_time: entry.mood_at_time,
        tags: entry.tags.iter().cloned().collect(),
        word_count: i32::try_from(entry.word_count()).unwrap_or(i32::MAX),
        audio_url,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    }
}

pub fn moods_from_rows(rows: &[MoodEntryRow]) -> Vec<MoodEntry> {
    rows.iter().map(mood_from_row).collect()
}

pub fn moods_to_rows(entries: &[MoodEntry], user_id: &str) -> Vec<NewMoodEntryRow> {
    entries.iter().map(|e| mood_to_row(e, user_id)).collect()
}

pub fn moods_to_display(entries: &[MoodEntry], today: NaiveDate) -> Vec<MoodDisplay> {
    entries.iter().map(|e| mood_to_display(e, today)).collect()
}

pub fn journals_from_rows(rows: &[JournalEntryRow]) -> Vec<JournalEntry> {
    rows.iter().map(journal_from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryType, MoodCategory, Privacy};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn remote_row(d: u32, category: MoodCategory) -> MoodEntryRow {
        MoodEntryRow {
            id: Uuid::new_v4(),
            user_id: "user-1".into(),
            date: day(d),
            mood_category: category,
            mood_score: 7,
            note_text: Some("from the cloud".into()),
            tags: Some(vec!["b".into(), "a".into()]),
            activities: None,
            created_at: Utc.with_ymd_and_hms(2025, 4, d, 9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_mood_from_row() {
        let row = remote_row(3, MoodCategory::Good);
        let entry = mood_from_row(&row);

        assert_eq!(entry.id, row.id);
        assert_eq!(entry.date, day(3));
        assert_eq!(entry.category, MoodCategory::Good);
        assert_eq!(entry.score, 7);
        assert_eq!(entry.note, "from the cloud");
        assert_eq!(entry.tags.len(), 2);
        assert!(entry.activities.is_empty());
        assert!(entry.voice_recording_path.is_none());
        assert_eq!(entry.updated_at, entry.created_at);
    }

    #[test]
    fn test_mood_from_row_clamps_score() {
        let mut row = remote_row(3, MoodCategory::Excellent);
        row.mood_score = 42;
        assert_eq!(mood_from_row(&row).score, 10);
        row.mood_score = -1;
        assert_eq!(mood_from_row(&row).score, 1);
    }

    #[test]
    fn test_mood_to_row_drops_voice_attachment() {
        let entry = MoodEntry::new(day(5), MoodCategory::Bad)
            .with_note("rough day")
            .with_tags(["work"])
            .with_voice_recording("/tmp/v.m4a", 30.0);

        let row = mood_to_row(&entry, "user-9");
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(row.user_id, "user-9");
        assert_eq!(row.mood_score, i32::from(entry.score));
        assert_eq!(row.tags, vec!["work".to_string()]);
        assert!(row.activities.is_none());
        assert!(json.get("voice_recording_path").is_none());
    }

    #[test]
    fn test_mood_to_display() {
        let entry = MoodEntry::new(day(9), MoodCategory::Excellent)
            .with_voice_recording("/tmp/v.m4a", 3.0);
        let display = mood_to_display(&entry, day(10));

        assert_eq!(display.emoji, "😄");
        assert_eq!(display.label, "Joyful");
        assert_eq!(display.time_ago, "Yesterday");
        assert!(display.has_voice_note);
    }

    #[test]
    fn test_mood_from_display() {
        let display = MoodDisplay {
            id: Uuid::new_v4(),
            date: day(2),
            emoji: "😟".into(),
            label: "Anxious".into(),
            note: "deadline".into(),
            tags: vec!["work".into()],
            has_voice_note: false,
            time_ago: "Today".into(),
        };

        let entry = mood_from_display(&display);
        assert_eq!(entry.id, display.id);
        assert_eq!(entry.category, MoodCategory::Bad);
        assert_eq!(entry.score, 3);
        assert!(entry.tags.contains("work"));
    }

    #[test]
    fn test_batch_conversions_preserve_order() {
        let rows = vec![
            remote_row(3, MoodCategory::Good),
            remote_row(1, MoodCategory::Bad),
            remote_row(2, MoodCategory::Neutral),
        ];
        let entries = moods_from_rows(&rows);
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(3), day(1), day(2)]);

        let back = moods_to_rows(&entries, "user-1");
        assert_eq!(back.len(), 3);
        assert_eq!(back[1].id, rows[1].id);

        assert!(moods_from_rows(&[]).is_empty());
        assert!(moods_to_rows(&[], "user-1").is_empty());
        assert!(moods_to_display(&[], day(1)).is_empty());
        assert!(journals_from_rows(&[]).is_empty());
    }

    #[test]
    fn test_journal_row_conversion() {
        let entry = JournalEntry::new("three small words")
            .with_title("Morning")
            .with_privacy(Privacy::Diary)
            .with_mood(MoodCategory::Good)
            .with_audio("/tmp/j.m4a");

        let row = journal_to_row(&entry, "user-1", Some("user-1/x.m4a".into()));
        assert_eq!(row.word_count, 3);
        assert_eq!(row.entry_type, EntryType::Both);
        assert_eq!(row.audio_url.as_deref(), Some("user-1/x.m4a"));

        let back = journal_from_row(&row.into_row());
        assert_eq!(back.id, entry.id);
        assert_eq!(back.title.as_deref(), Some("Morning"));
        assert_eq!(back.privacy, Privacy::Diary);
        assert_eq!(back.mood_at_time, Some(MoodCategory::Good));
        assert!(back.audio_path.is_none());
    }
}
