//! Pure mappings between the remote, local and display representations.
//!
//! Every function here is total: unknown glyphs and labels fall back to
//! documented defaults instead of failing.

mod mood;
mod records;

pub use mood::{
    category_from_emoji, category_from_label, category_from_score, default_score, emoji_for,
    label_for, score_from_label, time_ago, DEFAULT_SCORE,
};
pub use records::{
    journal_from_row, journal_to_row, journals_from_rows, mood_from_display, mood_from_row,
    mood_to_display, mood_to_row, moods_from_rows, moods_to_display, moods_to_rows,
};
