use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use iris_core::sync::{DEFAULT_BACKGROUND_INTERVAL_MINUTES, DEFAULT_WINDOW_DAYS};
use iris_core::SyncOptions;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn default_background_interval() -> i64 {
    DEFAULT_BACKGROUND_INTERVAL_MINUTES
}

/// Hosted backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Project URL (e.g., "https://project.example.co")
    pub url: Option<String>,
    /// Public API key sent with every request
    pub api_key: Option<String>,
    /// Account used to sign in
    pub email: Option<String>,
    /// Only read from IRIS_SYNC_PASSWORD; never written out
    #[serde(skip)]
    pub password: Option<String>,
    /// Days of remote history fetched by pull and merge
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Minimum minutes between background syncs
    #[serde(default = "default_background_interval")]
    pub background_interval_minutes: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            email: None,
            password: None,
            window_days: default_window_days(),
            background_interval_minutes: default_background_interval(),
        }
    }
}

impl SyncConfig {
    /// Returns true if the backend is configured (has both url and api_key)
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.api_key.is_some()
    }

    /// Returns true if there is enough to sign in at startup
    pub fn can_sign_in(&self) -> bool {
        self.is_configured() && self.email.is_some() && self.password.is_some()
    }

    pub fn options(&self) -> SyncOptions {
        SyncOptions::default()
            .with_window_days(self.window_days)
            .with_background_interval(chrono::Duration::minutes(
                self.background_interval_minutes.max(0),
            ))
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the SQLite database
    pub database_path: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Sync configuration
    pub sync: SyncConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    sync: Option<SyncConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut database_path =
            ConfigValue::new(Self::default_data_dir().join("iris.db"), ConfigSource::Default);
        let mut config_file = None;
        let mut sync = SyncConfig::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(db_path) = file_config.database_path {
                // Relative paths are relative to the config file
                let resolved_path = if db_path.is_relative() {
                    path.parent().map(|p| p.join(&db_path)).unwrap_or(db_path)
                } else {
                    db_path
                };
                database_path = ConfigValue::new(resolved_path, ConfigSource::File);
            }
            if let Some(sync_config) = file_config.sync {
                sync = sync_config;
            }
        }

        if let Ok(db_path) = std::env::var("IRIS_DATABASE_PATH") {
            database_path = ConfigValue::new(PathBuf::from(db_path), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("IRIS_SYNC_URL") {
            sync.url = Some(url);
        }
        if let Ok(key) = std::env::var("IRIS_SYNC_API_KEY") {
            sync.api_key = Some(key);
        }
        if let Ok(email) = std::env::var("IRIS_SYNC_EMAIL") {
            sync.email = Some(email);
        }
        if let Ok(password) = std::env::var("IRIS_SYNC_PASSWORD") {
            sync.password = Some(password);
        }

        Ok(Self {
            database_path,
            config_file,
            sync,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/iris/
    /// - macOS: ~/Library/Application Support/iris/
    /// - Windows: %APPDATA%/iris/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iris")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/iris/
    /// - macOS: ~/Library/Application Support/iris/
    /// - Windows: %APPDATA%/iris/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iris")
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
