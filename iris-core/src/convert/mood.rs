use chrono::NaiveDate;

use crate::models::MoodCategory;

/// Score used when a label matches nothing in [`LABEL_SCORES`].
pub const DEFAULT_SCORE: u8 = 5;

/// Keyword table for free-text feeling labels. Whole-label phrases are
/// matched first, then individual words in table order.
const LABEL_SCORES: &[(&str, u8)] = &[
    ("very bad", 2),
    ("sad", 2),
    ("unhappy", 2),
    ("lonely", 2),
    ("angry", 2),
    ("awful", 2),
    ("terrible", 2),
    ("depressed", 2),
    ("anxious", 3),
    ("stressed", 3),
    ("worried", 3),
    ("frustrated", 3),
    ("tired", 3),
    ("bad", 3),
    ("calm", 5),
    ("neutral", 5),
    ("okay", 5),
    ("ok", 5),
    ("fine", 5),
    ("peaceful", 7),
    ("content", 7),
    ("relaxed", 7),
    ("hopeful", 7),
    ("good", 7),
    ("joyful", 9),
    ("happy", 9),
    ("grateful", 9),
    ("excited", 9),
    ("great", 9),
    ("amazing", 9),
    ("excellent", 9),
];

pub fn emoji_for(category: MoodCategory) -> &'static str {
    match category {
        MoodCategory::Excellent => "😄",
        MoodCategory::Good => "🙂",
        MoodCategory::Neutral => "😐",
        MoodCategory::Bad => "😟",
        MoodCategory::VeryBad => "😢",
    }
}

/// Unknown glyphs fall back to `Neutral`.
pub fn category_from_emoji(emoji: &str) -> MoodCategory {
    let glyph = emoji.trim().trim_end_matches('\u{FE0F}');
    MoodCategory::ALL
        .into_iter()
        .find(|c| emoji_for(*c) == glyph)
        .unwrap_or(MoodCategory::Neutral)
}

pub fn label_for(category: MoodCategory) -> &'static str {
    match category {
        MoodCategory::Excellent => "Joyful",
        MoodCategory::Good => "Peaceful",
        MoodCategory::Neutral => "Calm",
        MoodCategory::Bad => "Anxious",
        MoodCategory::VeryBad => "Sad",
    }
}

/// Case-insensitive; unknown labels fall back to `Neutral`.
pub fn category_from_label(label: &str) -> MoodCategory {
    let label = label.trim();
    MoodCategory::ALL
        .into_iter()
        .find(|c| label_for(*c).eq_ignore_ascii_case(label))
        .unwrap_or(MoodCategory::Neutral)
}

pub fn default_score(category: MoodCategory) -> u8 {
    match category {
        MoodCategory::VeryBad => 2,
        MoodCategory::Bad => 3,
        MoodCategory::Neutral => 5,
        MoodCategory::Good => 7,
        MoodCategory::Excellent => 9,
    }
}

/// Maps a 1-10 score back onto the category scale. Out-of-range scores clamp.
pub fn category_from_score(score: u8) -> MoodCategory {
    match score.clamp(1, 10) {
        1..=2 => MoodCategory::VeryBad,
        3..=4 => MoodCategory::Bad,
        5..=6 => MoodCategory::Neutral,
        7..=8 => MoodCategory::Good,
        _ => MoodCategory::Excellent,
    }
}

/// Scores a free-text label. Never fails; unmatched input scores 5.
pub fn score_from_label(label: &str) -> u8 {
    let normalized = label.trim().to_lowercase();

    if let Some((_, score)) = LABEL_SCORES.iter().find(|(k, _)| *k == normalized) {
        return *score;
    }

    let words: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    LABEL_SCORES
        .iter()
        .find(|(keyword, _)| words.contains(keyword))
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_SCORE)
}

/// Relative day label: "Today", "Yesterday" or "N days ago".
pub fn time_ago(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n => format!("{} days ago", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_bijection() {
        for category in MoodCategory::ALL {
            assert_eq!(category_from_emoji(emoji_for(category)), category);
        }
    }

    #[test]
    fn test_label_bijection() {
        for category in MoodCategory::ALL {
            assert_eq!(category_from_label(label_for(category)), category);
        }
        assert_eq!(category_from_label("joyful"), MoodCategory::Excellent);
        assert_eq!(category_from_label(" SAD "), MoodCategory::VeryBad);
    }

    #[test]
    fn test_label_emoji_round_trip() {
        for category in MoodCategory::ALL {
            let via_label = category_from_label(label_for(category));
            assert_eq!(category_from_emoji(emoji_for(via_label)), category);
        }
    }

    #[test]
    fn test_unknown_emoji_is_neutral() {
        assert_eq!(category_from_emoji("🦀"), MoodCategory::Neutral);
        assert_eq!(category_from_emoji(""), MoodCategory::Neutral);
        assert_eq!(category_from_emoji("happy"), MoodCategory::Neutral);
    }

    #[test]
    fn test_emoji_with_variation_selector() {
        assert_eq!(category_from_emoji("🙂\u{FE0F}"), MoodCategory::Good);
    }

    #[test]
    fn test_unknown_label_is_neutral() {
        assert_eq!(category_from_label("Meh"), MoodCategory::Neutral);
    }

    #[test]
    fn test_score_from_label() {
        assert_eq!(score_from_label("Joyful"), 9);
        assert_eq!(score_from_label("PEACEFUL"), 7);
        assert_eq!(score_from_label("calm"), 5);
        assert_eq!(score_from_label("Anxious"), 3);
        assert_eq!(score_from_label("sad"), 2);
        assert_eq!(score_from_label("Very bad"), 2);
        assert_eq!(score_from_label("feeling happy today"), 9);
    }

    #[test]
    fn test_score_from_label_defaults_to_midpoint() {
        assert_eq!(score_from_label(""), DEFAULT_SCORE);
        assert_eq!(score_from_label("purple"), DEFAULT_SCORE);
        assert_eq!(score_from_label("unhappyish"), DEFAULT_SCORE);
    }

    #[test]
    fn test_label_score_agrees_with_category_score() {
        for category in MoodCategory::ALL {
            assert_eq!(score_from_label(label_for(category)), default_score(category));
        }
    }

    #[test]
    fn test_category_from_score() {
        for category in MoodCategory::ALL {
            assert_eq!(category_from_score(default_score(category)), category);
        }
        assert_eq!(category_from_score(0), MoodCategory::VeryBad);
        assert_eq!(category_from_score(42), MoodCategory::Excellent);
    }

    #[test]
    fn test_time_ago() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(time_ago(today, today), "Today");
        assert_eq!(
            time_ago(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(), today),
            "Yesterday"
        );
        assert_eq!(
            time_ago(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(), today),
            "2 days ago"
        );
        assert_eq!(
            time_ago(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(), today),
            "10 days ago"
        );
        assert_eq!(
            time_ago(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(), today),
            "Today"
        );
    }
}
