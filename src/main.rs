use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{AffirmationCommand, ConfigCommand, JournalCommand, MoodCommand, SyncCommand};
use config::Config;
use iris_core::{InMemoryRemote, LocalStore, RemoteDataService, RestClient, SyncCoordinator};

#[derive(Parser)]
#[command(name = "iris")]
#[command(version)]
#[command(about = "Track moods and journal entries, synced when you want", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log and review daily moods
    Mood(MoodCommand),

    /// Write and read journal entries
    Journal(JournalCommand),

    /// Sync with the hosted backend
    Sync(SyncCommand),

    /// Show or set the daily affirmation
    Affirmation(AffirmationCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("IRIS_LOG")
                .unwrap_or_else(|_| "iris=warn,iris_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    let command = match cli.command {
        Some(Commands::Config(cmd)) => return cmd.run(&config),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let coordinator = connect(&config).await?;

    let result = match &command {
        Commands::Mood(cmd) => cmd.run(&coordinator).await,
        Commands::Journal(cmd) => cmd.run(&coordinator).await,
        Commands::Sync(cmd) => cmd.run(&coordinator, &config).await,
        Commands::Affirmation(cmd) => cmd.run(&coordinator).await,
        Commands::Config(_) => Ok(()),
    };

    // Background sync after everything except explicit sync commands
    if result.is_ok() && !matches!(command, Commands::Sync(_)) {
        if let Err(e) = coordinator.run_background_sync().await {
            tracing::warn!(error = %e, "Background sync failed");
        }
    }

    result
}

/// Opens the local store and, when the backend is configured, a REST client
/// signed in with the configured account. Sign-in failures leave the app
/// working locally.
async fn connect(config: &Config) -> Result<SyncCoordinator, Box<dyn std::error::Error>> {
    let store = LocalStore::open(&config.database_path.value).await?;

    let remote: Arc<dyn RemoteDataService> = match (&config.sync.url, &config.sync.api_key) {
        (Some(url), Some(api_key)) => Arc::new(RestClient::new(url.as_str(), api_key.as_str())),
        _ => Arc::new(InMemoryRemote::new()),
    };

    if config.sync.can_sign_in() {
        if let (Some(email), Some(password)) = (&config.sync.email, &config.sync.password) {
            match remote.sign_in(email, password).await {
                Ok(session) => tracing::debug!(user_id = %session.user_id, "Signed in"),
                Err(e) => tracing::warn!(error = %e, "Sign-in failed, working offline"),
            }
        }
    }

    Ok(SyncCoordinator::new(store, remote, config.sync.options()))
}
