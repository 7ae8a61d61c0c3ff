//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub store: StoreConfig,
    pub health: HealthConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
}

/// External store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store location (Postgres connection URL)
    pub url: String,
    /// Optional credential blob, JSON `{"username": ..., "password": ...}`
    pub credentials: Option<String>,
    pub max_connections: u32,
    /// Per-attempt timeout for every gateway call
    pub timeout_ms: u64,
    /// Attempts after the first one
    pub retries: u32,
    pub retry_backoff_ms: u64,
}

/// Liveness endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,
    pub bind_address: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub file_path: Option<String>,
}

/// Parsed form of [`StoreConfig::credentials`]
#[derive(Debug, Clone, Deserialize)]
pub struct StoreCredentials {
    pub username: String,
    pub password: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file plus environment variables
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name(path).required(true))
    }

    fn load(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("COMPANYBOT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("bot.token", std::env::var("BOT_TOKEN").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CompanyBotError> {
        super::validation::validate_settings(self)
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Parse the credential blob, if any
    pub fn parsed_credentials(&self) -> Result<Option<StoreCredentials>, serde_json::Error> {
        self.credentials
            .as_deref()
            .filter(|blob| !blob.trim().is_empty())
            .map(serde_json::from_str)
            .transpose()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            credentials: None,
            max_connections: 5,
            timeout_ms: 3000,
            retries: 2,
            retry_backoff_ms: 200,
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}
