//! Sync CLI commands for the hosted backend.

use clap::{Args, Subcommand, ValueEnum};

use super::OutputFormat;
use crate::config::Config;
use iris_core::{ConflictStrategy, FullSyncReport, PullReport, PushReport, SyncCoordinator};

/// Sync with the hosted backend
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: Option<SyncSubcommand>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
enum SyncSubcommand {
    /// Upload local moods not yet synced
    Push,
    /// Download remote moods for days missing locally
    Pull,
    /// Replace local moods with the remote copy where both exist
    Merge,
    /// Push, then pull (the default)
    Full,
    /// Pull and record the incremental sync marker
    Incremental,
    /// Show sync configuration and record counts
    Status {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Turn cloud sync on (pushes immediately)
    Enable,
    /// Turn cloud sync off
    Disable,
    /// Turn background sync on or off
    Background {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Upload every local mood once
    Migrate,
    /// Settle days recorded both locally and remotely
    Resolve {
        /// cloud-wins, local-wins, newer-wins or merge
        #[arg(long, default_value = "cloud-wins")]
        strategy: String,
    },
    /// Forget sync history so everything is pushed again
    Reset,
}

impl SyncCommand {
    pub async fn run(
        &self,
        coordinator: &SyncCoordinator,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let needs_session = !matches!(
            self.command,
            Some(SyncSubcommand::Status { .. })
                | Some(SyncSubcommand::Disable)
                | Some(SyncSubcommand::Background { .. })
                | Some(SyncSubcommand::Reset)
        );
        if needs_session && coordinator.remote().current_user_id().is_none() {
            if config.sync.is_configured() {
                println!("Not signed in. Set sync.email and IRIS_SYNC_PASSWORD to sign in.");
            } else {
                println!("Sync not configured. Add sync.url and sync.api_key to config.");
            }
            if !matches!(self.command, Some(SyncSubcommand::Enable)) {
                return Ok(());
            }
        }

        match &self.command {
            None | Some(SyncSubcommand::Full) => {
                println!("Syncing...");
                let report = coordinator.full_sync().await?;
                print_full(&report);
            }
            Some(SyncSubcommand::Push) => print_push(&coordinator.push().await?),
            Some(SyncSubcommand::Pull) => print_pull(&coordinator.pull().await?),
            Some(SyncSubcommand::Merge) => {
                let report = coordinator.merge().await?;
                println!(
                    "Merged: {} day(s) from remote, {} local only, {} total",
                    report.remote, report.local_only, report.total
                );
                print_errors(&report.errors);
            }
            Some(SyncSubcommand::Incremental) => {
                print_pull(&coordinator.incremental_sync().await?)
            }
            Some(SyncSubcommand::Status { format }) => self.status(coordinator, config, format).await?,
            Some(SyncSubcommand::Enable) => {
                if let Some(report) = coordinator.set_cloud_sync_enabled(true).await? {
                    println!("Cloud sync enabled.");
                    print_push(&report);
                }
            }
            Some(SyncSubcommand::Disable) => {
                coordinator.set_cloud_sync_enabled(false).await?;
                println!("Cloud sync disabled. Data already uploaded stays remote.");
            }
            Some(SyncSubcommand::Background { state }) => {
                let enabled = matches!(state, Toggle::On);
                coordinator.set_background_sync_enabled(enabled).await?;
                println!(
                    "Background sync {}.",
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            Some(SyncSubcommand::Migrate) => {
                let report = coordinator.migrate_local_to_cloud().await?;
                println!(
                    "Migration complete: {} uploaded, {} already present",
                    report.created, report.skipped
                );
            }
            Some(SyncSubcommand::Resolve { strategy }) => {
                let strategy: ConflictStrategy = strategy.parse()?;
                let report = coordinator.resolve_conflicts(strategy).await?;
                println!(
                    "Resolved with {}: {} day(s) from remote, {} local only",
                    strategy, report.remote, report.local_only
                );
                print_errors(&report.errors);
            }
            Some(SyncSubcommand::Reset) => {
                let reset = coordinator.reset_sync_cache().await?;
                println!("Sync history cleared for {} record(s).", reset);
            }
        }

        Ok(())
    }

    async fn status(
        &self,
        coordinator: &SyncCoordinator,
        config: &Config,
        format: &OutputFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let stats = coordinator.stats().await?;

        if let OutputFormat::Json = format {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }

        println!("Sync Status");
        println!("===========");
        println!();
        match &config.sync.url {
            Some(url) => println!("Backend:          {}", url),
            None => println!("Backend:          (not configured)"),
        }
        match &stats.signed_in_user {
            Some(user) => println!("Signed in as:     {}", user),
            None => println!("Signed in as:     (nobody)"),
        }
        println!("Cloud sync:       {}", on_off(stats.cloud_sync_enabled));
        println!("Background sync:  {}", on_off(stats.background_sync_enabled));
        println!(
            "Migration:        {}",
            if stats.migration_completed { "done" } else { "not run" }
        );
        println!("State:            {}", stats.state);
        println!(
            "Last full sync:   {}",
            stats
                .last_full_sync
                .map(|d| d.to_rfc3339())
                .unwrap_or_else(|| "never".to_string())
        );
        println!(
            "Last incremental: {}",
            stats
                .last_incremental_sync
                .map(|d| d.to_rfc3339())
                .unwrap_or_else(|| "never".to_string())
        );
        println!();
        println!("Moods:    {}", stats.moods);
        println!("Journals: {}", stats.journals);
        println!(
            "Synced {} · pending {} · failed {}",
            stats.synced, stats.pending, stats.failed
        );
        Ok(())
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn print_errors(errors: &[String]) {
    for error in errors {
        println!("  ✗ {}", error);
    }
}

fn print_push(report: &PushReport) {
    println!(
        "  ✓ pushed {} · skipped {} · failed {}",
        report.created, report.skipped, report.failed
    );
    print_errors(&report.errors);
}

fn print_pull(report: &PullReport) {
    println!(
        "  ✓ fetched {} · added {} · kept local {}",
        report.fetched, report.inserted, report.kept_local
    );
    print_errors(&report.errors);
}

fn print_full(report: &FullSyncReport) {
    print_push(&report.push);
    print_pull(&report.pull);
    println!();
    if report.has_errors() {
        println!("Sync finished with errors; failed records will be retried next time.");
    } else {
        println!("Sync complete.");
    }
}
