use chrono::{Datelike, NaiveDate};
use clap::{Args, Subcommand};

use super::parse_date_or_today;
use iris_core::SyncCoordinator;

const AFFIRMATIONS: &[&str] = &[
    "You are allowed to take up space.",
    "Small steps still move you forward.",
    "Your feelings are valid, and they will pass.",
    "Rest is productive too.",
    "You have handled hard days before.",
    "Be as kind to yourself as you are to others.",
    "Today does not have to be perfect to be good.",
];

#[derive(Args)]
pub struct AffirmationCommand {
    #[command(subcommand)]
    pub command: AffirmationSubcommand,
}

#[derive(Subcommand)]
pub enum AffirmationSubcommand {
    /// Show the affirmation of the day
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Replace the affirmation of a day
    Set {
        text: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },
}

impl AffirmationCommand {
    pub async fn run(&self, coordinator: &SyncCoordinator) -> Result<(), Box<dyn std::error::Error>> {
        let store = coordinator.store();

        match &self.command {
            AffirmationSubcommand::Show { date } => {
                let day = parse_date_or_today(date)?;
                let text = match store.cached_affirmation(day).await? {
                    Some(text) => text,
                    None => {
                        let text = affirmation_for(day).to_string();
                        store.cache_affirmation(day, &text).await?;
                        text
                    }
                };
                println!("{}", text);
            }
            AffirmationSubcommand::Set { text, date } => {
                let day = parse_date_or_today(date)?;
                if text.trim().is_empty() {
                    return Err("Affirmation text cannot be empty".into());
                }
                store.cache_affirmation(day, text.trim()).await?;
                println!("Affirmation for {} saved.", day);
            }
        }
        Ok(())
    }
}

/// Built-in pick for a day with nothing cached; stable for a given date.
fn affirmation_for(day: NaiveDate) -> &'static str {
    let index = day.num_days_from_ce().rem_euclid(AFFIRMATIONS.len() as i32) as usize;
    AFFIRMATIONS[index]
}
