use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a mood history row shows on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDisplay {
    pub id: Uuid,
    pub date: NaiveDate,
    pub emoji: String,
    pub label: String,
    pub note: String,
    pub tags: Vec<String>,
    pub has_voice_note: bool,
    pub time_ago: String,
}
