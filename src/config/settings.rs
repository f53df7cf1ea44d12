//! Configuration settings management
//!
//! This module handles loading configuration from multiple sources,
//! validation, and persistence. All values are fixed once loaded; nothing
//! in the crate mutates a `Config` after startup.

use crate::error::{Result, SqlpalError};
use crate::utils::datetime::{FILE_STAMP_FORMAT, TIME_FORMAT};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Database endpoint parameters. The password is deliberately absent; it is
/// sourced from the environment or the credentials file, never from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: "genshincharacters".to_string(),
            username: "root".to_string(),
        }
    }
}

impl ConnectionSettings {
    /// Render the endpoint as a `mysql://host:port/database` URL.
    pub fn endpoint_url(&self) -> String {
        format!("mysql://{}:{}/{}", self.host, self.port, self.database)
    }
}

/// Session log policy: where transcripts go, how they are named, and how many
/// are retained before the oldest are pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub version: String,
    pub max_retained_files: usize,
    pub directory: PathBuf,
    pub time_format: String,
    pub file_name_format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            version: "0.6.0".to_string(),
            max_retained_files: 32,
            directory: PathBuf::from("logs"),
            time_format: TIME_FORMAT.to_string(),
            file_name_format: FILE_STAMP_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub debug: bool,
    /// Record each executed statement in the transcript.
    pub log_queries: bool,
    /// Print SELECT results to the console as they arrive.
    pub log_results: bool,
    pub no_color: bool,
    /// Path of the credentials file, relative to the working directory.
    pub credentials_file: PathBuf,
    pub connection: ConnectionSettings,
    pub logging: LoggingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log_queries: true,
            log_results: true,
            no_color: false,
            credentials_file: PathBuf::from("credentials.txt"),
            connection: ConnectionSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.connection.port == 0 {
            return Err(SqlpalError::config("Port must be nonzero"));
        }

        if self.connection.database.is_empty() {
            return Err(SqlpalError::config("Database name is required"));
        }

        if self.connection.username.is_empty() {
            return Err(SqlpalError::config("Username is required"));
        }

        if self.logging.max_retained_files == 0 {
            return Err(SqlpalError::config(
                "max_retained_files must be at least 1",
            ));
        }

        let version_re = Regex::new(r"^\d+\.\d+\.\d+$")?;
        if !version_re.is_match(&self.logging.version) {
            return Err(SqlpalError::config(format!(
                "Log version '{}' is not MAJOR.MINOR.PATCH",
                self.logging.version
            )));
        }

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        // Use XDG Base Directory specification on Linux and macOS
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            use std::env;
            let config_dir = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
                PathBuf::from(xdg_config_home)
            } else {
                let home_dir = env::var("HOME")
                    .map_err(|_| SqlpalError::config("HOME environment variable not set"))?;
                PathBuf::from(home_dir).join(".config")
            };
            Ok(config_dir.join("sqlpal").join("sqlpal.toml"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| SqlpalError::config("Unable to determine config directory"))?;
            Ok(config_dir.join("sqlpal").join("sqlpal.toml"))
        }
    }

    pub async fn load() -> Result<Self> {
        let config = load_config_no_validation().await?;
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self) -> Result<()> {
        save_config(self).await
    }
}

/// Load configuration with priority order:
/// 1. Environment variables
/// 2. Configuration file
/// 3. Default values
pub async fn load_config() -> Result<Config> {
    Config::load().await
}

/// Load configuration without validation (for `config` subcommands).
pub async fn load_config_no_validation() -> Result<Config> {
    let mut config = Config::default();

    let config_path = Config::get_config_path()?;
    if config_path.exists() {
        config = load_from_file(&config_path).await?;
    }

    load_from_env(&mut config);

    Ok(config)
}

async fn load_from_file(path: &PathBuf) -> Result<Config> {
    let contents = tokio::fs::read_to_string(path).await?;

    // Try to parse as TOML first, then JSON as fallback
    if let Ok(config) = toml::from_str::<Config>(&contents) {
        return Ok(config);
    }

    let config = serde_json::from_str::<Config>(&contents)?;
    Ok(config)
}

pub fn load_from_env(config: &mut Config) {
    if let Ok(value) = std::env::var("DEBUG") {
        config.debug = value.to_lowercase() == "true" || value == "1";
    }

    if let Ok(value) = std::env::var("SQLPAL_HOST") {
        config.connection.host = value;
    }

    if let Ok(value) = std::env::var("SQLPAL_PORT") {
        if let Ok(port) = value.parse::<u16>() {
            config.connection.port = port;
        }
    }

    if let Ok(value) = std::env::var("SQLPAL_DATABASE") {
        config.connection.database = value;
    }

    if let Ok(value) = std::env::var("SQLPAL_USER") {
        config.connection.username = value;
    }

    if let Ok(value) = std::env::var("SQLPAL_LOG_DIR") {
        config.logging.directory = PathBuf::from(value);
    }

    if let Ok(value) = std::env::var("SQLPAL_MAX_LOGS") {
        if let Ok(max) = value.parse::<usize>() {
            config.logging.max_retained_files = max;
        }
    }

    if let Ok(value) = std::env::var("SQLPAL_CREDENTIALS_FILE") {
        config.credentials_file = PathBuf::from(value);
    }
}

pub async fn save_config(config: &Config) -> Result<()> {
    let config_path = Config::get_config_path()?;

    if let Some(parent) = config_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(config)
        .map_err(|e| SqlpalError::serialization(e.to_string()))?;

    tokio::fs::write(&config_path, contents).await?;

    Ok(())
}

pub async fn init_default_config() -> Result<()> {
    let config_path = Config::get_config_path()?;

    // Don't overwrite existing configuration
    if config_path.exists() {
        return Ok(());
    }

    let config = Config::default();
    save_config(&config).await?;

    Ok(())
}
