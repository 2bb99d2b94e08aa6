use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

use super::mood_category::MoodCategory;
use crate::convert;

/// Average reading speed used for read-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Text,
    Voice,
    Both,
}

impl EntryType {
    pub fn has_voice(&self) -> bool {
        matches!(self, EntryType::Voice | EntryType::Both)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Text => write!(f, "text"),
            EntryType::Voice => write!(f, "voice"),
            EntryType::Both => write!(f, "both"),
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(EntryType::Text),
            "voice" => Ok(EntryType::Voice),
            "both" => Ok(EntryType::Both),
            _ => Err(format!(
                "Invalid entry type '{}'. Valid options: text, voice, both",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Private,
    Shared,
    Diary,
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Privacy::Private => write!(f, "private"),
            Privacy::Shared => write!(f, "shared"),
            Privacy::Diary => write!(f, "diary"),
        }
    }
}

impl FromStr for Privacy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Privacy::Private),
            "shared" => Ok(Privacy::Shared),
            "diary" => Ok(Privacy::Diary),
            _ => Err(format!(
                "Invalid privacy '{}'. Valid options: private, shared, diary",
                s
            )),
        }
    }
}

/// A free-form journal entry, written or dictated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: String,
    pub entry_type: EntryType,
    pub privacy: Privacy,
    pub mood_at_time: Option<MoodCategory>,
    pub tags: BTreeSet<String>,
    /// Local recording; uploaded to blob storage on sync.
    pub audio_path: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: None,
            content: content.into(),
            entry_type: EntryType::Text,
            privacy: Privacy::Private,
            mood_at_time: None,
            tags: BTreeSet::new(),
            audio_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = privacy;
        self
    }

    pub fn with_mood(mut self, mood: MoodCategory) -> Self {
        self.mood_at_time = Some(mood);
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

    /// Attaches a recording and upgrades the entry type accordingly.
    pub fn with_audio(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_path = Some(path.into());
        self.entry_type = if self.content.trim().is_empty() {
            EntryType::Voice
        } else {
            EntryType::Both
        };
        self
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    pub fn read_time_minutes(&self) -> usize {
        read_time_minutes(self.word_count())
    }

    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Explicit title, or a relative day label when none was given.
    pub fn display_title(&self, today: NaiveDate) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => convert::time_ago(self.day(), today),
        }
    }
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Whole minutes, rounded down, never below one.
pub fn read_time_minutes(words: usize) -> usize {
    (words / WORDS_PER_MINUTE).max(1)
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let today = Utc::now().date_naive();
        let title = self.display_title(today);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;
        writeln!(
            f,
            "{} · {} · {} words · {} min read",
            self.entry_type,
            self.privacy,
            self.word_count(),
            self.read_time_minutes()
        )?;

        if let Some(mood) = self.mood_at_time {
            writeln!(f, "Mood: {} {}", convert::emoji_for(mood), convert::label_for(mood))?;
        }

        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
            writeln!(f, "Tags: {}", tags.join(", "))?;
        }

        if !self.content.is_empty() {
            writeln!(f, "\n{}", self.content)?;
        }

        Ok(())
    }
}
