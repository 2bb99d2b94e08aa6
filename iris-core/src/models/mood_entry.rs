use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use super::mood_category::MoodCategory;
use crate::convert;

/// A mood check-in. The local store keeps at most one per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: MoodCategory,
    pub score: u8,
    pub note: String,
    pub tags: BTreeSet<String>,
    pub activities: BTreeSet<String>,
    /// Local-only attachment, never sent to the remote service.
    pub voice_recording_path: Option<PathBuf>,
    /// Seconds.
    pub voice_recording_duration: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, category: MoodCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date,
            category,
            score: convert::default_score(category),
            note: String::new(),
            tags: BTreeSet::new(),
            activities: BTreeSet::new(),
            voice_recording_path: None,
            voice_recording_duration: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Re-derives the score from a free-text feeling label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.score = convert::score_from_label(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_activities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = activities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_voice_recording(mut self, path: impl Into<PathBuf>, duration: f64) -> Self {
        self.voice_recording_path = Some(path.into());
        self.voice_recording_duration = Some(duration);
        self
    }

    /// Calendar-day match, the key used to pair local and remote copies.
    pub fn same_day(&self, other: &MoodEntry) -> bool {
        self.date == other.date
    }

    pub fn has_voice_recording(&self) -> bool {
        self.voice_recording_path.is_some()
    }
}

impl fmt::Display for MoodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} {} ({}/10)",
            self.date,
            convert::emoji_for(self.category),
            convert::label_for(self.category),
            self.score
        )?;

        if !self.note.is_empty() {
            writeln!(f, "  {}", self.note)?;
        }

        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
            writeln!(f, "  Tags: {}", tags.join(", "))?;
        }

        if !self.activities.is_empty() {
            let activities: Vec<&str> = self.activities.iter().map(String::as_str).collect();
            writeln!(f, "  Activities: {}", activities.join(", "))?;
        }

        if let Some(duration) = self.voice_recording_duration {
            writeln!(f, "  Voice note: {:.0}s", duration)?;
        }

        Ok(())
    }
}
