mod journal_entry;
mod mood_category;
mod mood_display;
mod mood_entry;
mod sync_status;

pub use journal_entry::{read_time_minutes, word_count, EntryType, JournalEntry, Privacy};
pub use mood_category::MoodCategory;
pub use mood_display::MoodDisplay;
pub use mood_entry::MoodEntry;
pub use sync_status::SyncStatus;
