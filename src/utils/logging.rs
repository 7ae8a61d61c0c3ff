//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the CompanyBot application.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{CompanyBotError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file appender and must live as long as the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.level))
        .map_err(|e| CompanyBotError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    let guard = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "companybot.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
                .try_init()
                .map_err(|e| CompanyBotError::Config(format!("Logging already initialized: {}", e)))?;
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()
                .map_err(|e| CompanyBotError::Config(format!("Logging already initialized: {}", e)))?;
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Operator signal: a durable write or lookup gave up and the session runs on memory only
pub fn log_degraded(user_id: i64, operation: &str, error: &CompanyBotError) {
    warn!(
        user_id = user_id,
        operation = operation,
        error = %error,
        severity = %error.severity(),
        degraded = true,
        "External store unavailable, continuing with in-memory state"
    );
}

/// Log ignored callback payloads
pub fn log_protocol_rejection(user_id: i64, payload: &str, error: &CompanyBotError) {
    debug!(
        user_id = user_id,
        payload = payload,
        error = %error,
        "Callback payload ignored"
    );
}

/// Log finished quizzes
pub fn log_quiz_completed(user_id: i64, quiz_key: &str, score: usize, max_score: usize) {
    info!(
        user_id = user_id,
        quiz_key = quiz_key,
        score = score,
        max_score = max_score,
        "Quiz completed"
    );
}

/// Log gateway operations
pub fn log_store_operation(operation: &str, user_id: i64, attempt: u32, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            user_id = user_id,
            attempt = attempt,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        warn!(
            operation = operation,
            user_id = user_id,
            attempt = attempt,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}
