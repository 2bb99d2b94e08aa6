mod affirmation;
mod config_cmd;
mod journal;
mod mood;
mod sync_cmd;

pub use affirmation::AffirmationCommand;
pub use config_cmd::ConfigCommand;
pub use journal::JournalCommand;
pub use mood::MoodCommand;
pub use sync_cmd::SyncCommand;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use iris_core::WriteOutcome;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses YYYY-MM-DD, or returns today when absent.
pub fn parse_date_or_today(date: &Option<String>) -> Result<NaiveDate, String> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", date))
}

pub fn print_outcome(outcome: &WriteOutcome) {
    match outcome {
        WriteOutcome::LocalOnly => println!("Saved locally."),
        WriteOutcome::Synced { .. } => println!("Saved and synced."),
        WriteOutcome::SyncPending { error } => {
            println!("Saved locally; sync pending ({}).", error)
        }
    }
}
