use chrono::{Local, Utc};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use super::{parse_date, print_outcome, OutputFormat};
use iris_core::{JournalEntry, MoodCategory, Privacy, SyncCoordinator};

#[derive(Args)]
pub struct JournalCommand {
    #[command(subcommand)]
    pub command: JournalSubcommand,
}

#[derive(Subcommand)]
pub enum JournalSubcommand {
    /// Write a new journal entry
    Add {
        /// Entry text
        content: Option<String>,

        /// Optional title; entries without one are labelled by age
        #[arg(long, short)]
        title: Option<String>,

        /// Privacy (private, shared, diary)
        #[arg(long, default_value = "private")]
        privacy: String,

        /// Mood at the time of writing
        #[arg(long)]
        mood: Option<String>,

        /// Add a tag (can be repeated)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Voice recording to attach
        #[arg(long)]
        audio: Option<PathBuf>,
    },

    /// List journal entries
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

    /// Show one journal entry
    Show {
        /// Journal entry ID (UUID)
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Save an entry's voice recording to a file
    Audio {
        /// Journal entry ID (UUID)
        id: String,

        /// Where to write the recording
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Delete a journal entry (and its uploaded copy)
    Delete {
        /// Journal entry ID (UUID)
        id: String,
    },
}

impl JournalCommand {
    pub async fn run(&self, coordinator: &SyncCoordinator) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            JournalSubcommand::Add {
                content,
                title,
                privacy,
                mood,
                tags,
                audio,
            } => {
                let content = content.clone().unwrap_or_default();
                if content.trim().is_empty() && audio.is_none() {
                    return Err("Provide entry text, --audio, or both".into());
                }

                let privacy: Privacy = privacy.parse()?;
                let mut entry = JournalEntry::new(content)
                    .with_privacy(privacy)
                    .with_tags(tags.iter().cloned());
                if let Some(title) = title {
                    entry = entry.with_title(title.clone());
                }
                if let Some(mood) = mood {
                    let mood: MoodCategory = mood.parse()?;
                    entry = entry.with_mood(mood);
                }
                if let Some(audio) = audio {
                    entry = entry.with_audio(audio.clone());
                }

                let outcome = coordinator.save_journal(&entry).await?;
                println!("Created journal entry {}", entry.id);
                print_outcome(&outcome);
                Ok(())
            }

            JournalSubcommand::List { format, from, to } => {
                // Entries are stored by UTC creation time
                let to_date = match to {
                    Some(d) => parse_date(d)?,
                    None => Utc::now().date_naive(),
                };
                let from_date = match from {
                    Some(d) => parse_date(d)?,
                    None => coordinator.window().0,
                };

                let entries = coordinator.list_journals(from_date, to_date).await?;
                if entries.is_empty() {
                    println!("No journal entries found for {} to {}", from_date, to_date);
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                    }
                    OutputFormat::Text => {
                        let today = Local::now().date_naive();
                        println!(
                            "{:<36}  {:<24} {:<8} {:>6} {:>5}",
                            "ID", "TITLE", "PRIVACY", "WORDS", "MIN"
                        );
                        println!("{}", "-".repeat(86));
                        for entry in &entries {
                            let voice = if entry.entry_type.has_voice() { " 🎙" } else { "" };
                            println!(
                                "{:<36}  {:<24} {:<8} {:>6} {:>5}{}",
                                entry.id,
                                truncate(&entry.display_title(today), 24),
                                entry.privacy,
                                entry.word_count(),
                                entry.read_time_minutes(),
                                voice
                            );
                        }
                        println!(
                            "\nTotal: {} entr{}",
                            entries.len(),
                            if entries.len() == 1 { "y" } else { "ies" }
                        );
                    }
                }
                Ok(())
            }

            JournalSubcommand::Show { id, format } => {
                let uuid = parse_id(id)?;
                let entry = coordinator
                    .journal(uuid)
                    .await?
                    .ok_or_else(|| format!("Journal entry not found: {}", id))?;

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
                    OutputFormat::Text => print!("{}", entry),
                }
                Ok(())
            }

            JournalSubcommand::Audio { id, output } => {
                let uuid = parse_id(id)?;
                let bytes = coordinator
                    .journal_audio(uuid)
                    .await?
                    .ok_or_else(|| format!("No recording for journal entry {}", id))?;
                tokio::fs::write(output, &bytes).await?;
                println!("Wrote {} bytes to {}", bytes.len(), output.display());
                Ok(())
            }

            JournalSubcommand::Delete { id } => {
                let uuid = parse_id(id)?;
                let outcome = coordinator
                    .delete_journal(uuid)
                    .await?
                    .ok_or_else(|| format!("Journal entry not found: {}", id))?;
                println!("Deleted journal entry {}", uuid);
                print_outcome(&outcome);
                Ok(())
            }
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid journal entry UUID: {}", id))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
