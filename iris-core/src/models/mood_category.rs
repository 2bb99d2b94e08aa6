use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five-step mood scale, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodCategory {
    VeryBad,
    Bad,
    Neutral,
    Good,
    Excellent,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 5] = [
        MoodCategory::VeryBad,
        MoodCategory::Bad,
        MoodCategory::Neutral,
        MoodCategory::Good,
        MoodCategory::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::VeryBad => "very_bad",
            MoodCategory::Bad => "bad",
            MoodCategory::Neutral => "neutral",
            MoodCategory::Good => "good",
            MoodCategory::Excellent => "excellent",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "very_bad" => Ok(MoodCategory::VeryBad),
            "bad" => Ok(MoodCategory::Bad),
            "neutral" => Ok(MoodCategory::Neutral),
            "good" => Ok(MoodCategory::Good),
            "excellent" => Ok(MoodCategory::Excellent),
            _ => Err(format!(
                "Invalid mood '{}'. Valid options: very_bad, bad, neutral, good, excellent",
                s
            )),
        }
    }
}
