use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("database_path: {}", config.database_path.value.display());
                        println!("  source: {}", config.database_path.source);
                        println!();

                        let sync = &config.sync;
                        println!("sync.url: {}", sync.url.as_deref().unwrap_or("(not set)"));
                        println!(
                            "sync.api_key: {}",
                            if sync.api_key.is_some() { "(set)" } else { "(not set)" }
                        );
                        println!("sync.email: {}", sync.email.as_deref().unwrap_or("(not set)"));
                        println!(
                            "sync.password: {}",
                            if sync.password.is_some() {
                                "(from IRIS_SYNC_PASSWORD)"
                            } else {
                                "(not set)"
                            }
                        );
                        println!("sync.window_days: {}", sync.window_days);
                        println!(
                            "sync.background_interval_minutes: {}",
                            sync.background_interval_minutes
                        );
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'iris config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let default_config = r#"# iris configuration

# Path to SQLite database (default: platform data dir, e.g. ~/.local/share/iris/iris.db)
# database_path: ~/.local/share/iris/iris.db

# Hosted backend. The password is read from IRIS_SYNC_PASSWORD only.
# sync:
#   url: https://project.example.co
#   api_key: your-anon-key
#   email: you@example.com
#   window_days: 90
#   background_interval_minutes: 60
"#;

                let mut file = fs::File::create(&config_path)?;
                file.write_all(default_config.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}
