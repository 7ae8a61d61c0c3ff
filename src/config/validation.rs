//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::net::SocketAddr;
use crate::utils::errors::{CompanyBotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_store_config(&settings.store)?;
    validate_health_config(&settings.health)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(CompanyBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate external store configuration
fn validate_store_config(config: &super::StoreConfig) -> Result<()> {
    if config.url.trim().is_empty() {
        return Err(CompanyBotError::Config(
            "Store URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(CompanyBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.timeout_ms == 0 {
        return Err(CompanyBotError::Config(
            "Store timeout must be greater than 0".to_string()
        ));
    }

    if config.retries > 5 {
        return Err(CompanyBotError::Config(
            format!("Store retries must be at most 5, got {}", config.retries)
        ));
    }

    config.parsed_credentials().map_err(|e| {
        CompanyBotError::Config(format!("Store credentials are not valid JSON: {}", e))
    })?;

    Ok(())
}

/// Validate liveness endpoint configuration
fn validate_health_config(config: &super::HealthConfig) -> Result<()> {
    if config.enabled && config.bind_address.parse::<SocketAddr>().is_err() {
        return Err(CompanyBotError::Config(
            format!("Invalid health bind address: {}", config.bind_address)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CompanyBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CompanyBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings.store.url = "postgresql://localhost/companybot".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let mut settings = valid_settings();
        settings.bot.token = "  ".to_string();
        let err = validate_settings(&settings).unwrap_err();
        assert!(matches!(err, CompanyBotError::Config(ref msg) if msg.contains("token")));
    }

    #[test]
    fn test_missing_store_location_is_config_error() {
        let mut settings = valid_settings();
        settings.store.url.clear();
        assert!(matches!(validate_settings(&settings), Err(CompanyBotError::Config(_))));
    }

    #[test]
    fn test_bad_credentials_blob_rejected() {
        let mut settings = valid_settings();
        settings.store.credentials = Some("not json".to_string());
        assert!(validate_settings(&settings).is_err());

        settings.store.credentials = Some(r#"{"username":"bot","password":"secret"}"#.to_string());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_invalid_log_level_and_bind_address() {
        let mut settings = valid_settings();
        settings.logging.level = "loud".to_string();
        assert!(validate_settings(&settings).is_err());

        let mut settings = valid_settings();
        settings.health.bind_address = "not-an-address".to_string();
        assert!(validate_settings(&settings).is_err());

        settings.health.enabled = false;
        assert!(validate_settings(&settings).is_ok());
    }
}
