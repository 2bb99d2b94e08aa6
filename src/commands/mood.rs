use chrono::Local;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use super::{parse_date, parse_date_or_today, print_outcome, OutputFormat};
use iris_core::convert::{category_from_emoji, emoji_for, label_for, mood_to_display, moods_to_display};
use iris_core::{MoodCategory, MoodEntry, SyncCoordinator};

#[derive(Args)]
pub struct MoodCommand {
    #[command(subcommand)]
    pub command: MoodSubcommand,
}

#[derive(Subcommand)]
pub enum MoodSubcommand {
    /// Record the mood of a day, replacing any earlier one
    Log {
        /// Mood: very-bad, bad, neutral, good, excellent, a label (Calm) or an emoji
        mood: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Feeling used to derive the score (e.g. "anxious", "peaceful")
        #[arg(long)]
        feeling: Option<String>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,

        /// Add a tag (can be repeated)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Add an activity (can be repeated)
        #[arg(long = "activity", value_name = "ACTIVITY")]
        activities: Vec<String>,

        /// Voice note recorded for this mood
        #[arg(long)]
        voice: Option<PathBuf>,

        /// Length of the voice note in seconds
        #[arg(long, requires = "voice")]
        duration: Option<f64>,
    },

    /// List logged moods
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Start date (YYYY-MM-DD), defaults to the sync window start
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,
    },

    /// Show the mood of one day
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a mood entry from this device
    ///
    /// The server copy is not deleted. A synced entry comes back on the next
    /// pull or full sync.
    Delete {
        /// Mood entry ID (UUID)
        id: String,
    },
}

impl MoodCommand {
    pub async fn run(&self, coordinator: &SyncCoordinator) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MoodSubcommand::Log {
                mood,
                date,
                feeling,
                note,
                tags,
                activities,
                voice,
                duration,
            } => {
                let category = parse_mood(mood)?;
                let date = parse_date_or_today(date)?;

                let mut entry = MoodEntry::new(date, category)
                    .with_tags(tags.iter().cloned())
                    .with_activities(activities.iter().cloned());
                if let Some(feeling) = feeling {
                    entry = entry.with_label(feeling);
                }
                if let Some(note) = note {
                    entry = entry.with_note(note.clone());
                }
                if let Some(voice) = voice {
                    entry = entry.with_voice_recording(voice.clone(), duration.unwrap_or(0.0));
                }

                let outcome = coordinator.save_mood(&entry).await?;
                print!("{}", entry);
                print_outcome(&outcome);
                Ok(())
            }

            MoodSubcommand::List { format, from, to } => {
                let today = Local::now().date_naive();
                let to_date = match to {
                    Some(d) => parse_date(d)?,
                    None => today,
                };
                let from_date = match from {
                    Some(d) => parse_date(d)?,
                    None => coordinator.window().0,
                };

                let entries = coordinator.list_moods(from_date, to_date).await?;
                if entries.is_empty() {
                    println!("No moods logged for {} to {}", from_date, to_date);
                    return Ok(());
                }

                let displays = moods_to_display(&entries, today);
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&displays)?);
                    }
                    OutputFormat::Text => {
                        for display in &displays {
                            let voice = if display.has_voice_note { " 🎙" } else { "" };
                            println!(
                                "{}  {} {:<9} {}{}",
                                display.date, display.emoji, display.label, display.time_ago, voice
                            );
                            if !display.note.is_empty() {
                                println!("            {}", display.note);
                            }
                            if !display.tags.is_empty() {
                                println!("            Tags: {}", display.tags.join(", "));
                            }
                        }
                        println!("\nTotal: {} mood(s)", displays.len());
                    }
                }
                Ok(())
            }

            MoodSubcommand::Show { date, format } => {
                let date = parse_date_or_today(date)?;
                let Some(entry) = coordinator.mood_for_day(date).await? else {
                    println!("No mood logged for {}", date);
                    return Ok(());
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&entry)?);
                    }
                    OutputFormat::Text => {
                        let display = mood_to_display(&entry, Local::now().date_naive());
                        println!("{} ({})", entry.date, display.time_ago);
                        println!("{}", "-".repeat(40));
                        println!("Mood:       {} {}", display.emoji, display.label);
                        println!("Score:      {}/10", entry.score);
                        if !entry.note.is_empty() {
                            println!("Note:       {}", entry.note);
                        }
                        if !entry.tags.is_empty() {
                            println!("Tags:       {}", display.tags.join(", "));
                        }
                        if !entry.activities.is_empty() {
                            let activities: Vec<&str> =
                                entry.activities.iter().map(String::as_str).collect();
                            println!("Activities: {}", activities.join(", "));
                        }
                        if let Some(path) = &entry.voice_recording_path {
                            println!("Voice note: {}", path.display());
                        }
                        println!("ID:         {}", entry.id);
                    }
                }
                Ok(())
            }

            MoodSubcommand::Delete { id } => {
                let uuid =
                    Uuid::parse_str(id).map_err(|_| format!("Invalid mood entry UUID: {}", id))?;
                if coordinator.delete_mood(uuid).await? {
                    println!("Deleted mood entry {}", uuid);
                    println!("A copy already synced stays on the server and returns on the next sync.");
                } else {
                    return Err(format!("Mood entry not found: {}", id).into());
                }
                Ok(())
            }
        }
    }
}

/// Accepts a category name, one of the display labels, or an emoji.
fn parse_mood(input: &str) -> Result<MoodCategory, String> {
    if let Ok(category) = input.parse::<MoodCategory>() {
        return Ok(category);
    }
    if let Some(category) = MoodCategory::ALL
        .into_iter()
        .find(|c| label_for(*c).eq_ignore_ascii_case(input.trim()))
    {
        return Ok(category);
    }
    if !input.trim().is_empty() && !input.chars().any(|c| c.is_ascii_alphanumeric()) {
        let category = category_from_emoji(input);
        if emoji_for(category) != input.trim().trim_end_matches('\u{FE0F}') {
            tracing::warn!(input, "Unrecognized emoji, logging as neutral");
        }
        return Ok(category);
    }
    Err(format!(
        "Invalid mood: {}. Valid options: very-bad, bad, neutral, good, excellent",
        input
    ))
}
