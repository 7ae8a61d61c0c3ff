//! Error handling for CompanyBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for CompanyBot application
#[derive(Error, Debug)]
pub enum CompanyBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External store error: {0}")]
    ExternalStore(String),

    #[error("External store call `{operation}` timed out after {timeout_ms}ms")]
    StoreTimeout { operation: String, timeout_ms: u64 },

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    #[error("Invalid input: {0}")]
    UserInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed or unknown button payloads
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty callback payload")]
    Empty,

    #[error("unknown callback action: {0}")]
    UnknownAction(String),

    #[error("unknown menu node: {0}")]
    UnknownNode(String),

    #[error("malformed callback payload: {0}")]
    Malformed(String),
}

/// Quiz engine rejections. None of them mutate the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("unknown quiz: {0}")]
    UnknownQuiz(String),

    #[error("no quiz in progress")]
    NoActiveAttempt,

    #[error("answer for quiz {got} while {active} is in progress")]
    QuizMismatch { active: String, got: String },

    #[error("stale answer: expected question {expected}, got {got}")]
    StaleAnswer { expected: usize, got: usize },

    #[error("option {option} out of range for question {question}")]
    InvalidOption { question: usize, option: usize },
}

/// Result type alias for CompanyBot operations
pub type Result<T> = std::result::Result<T, CompanyBotError>;

impl CompanyBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CompanyBotError::Database(_) => true,
            CompanyBotError::Migration(_) => false,
            CompanyBotError::Telegram(_) => true,
            CompanyBotError::Config(_) => false,
            CompanyBotError::ExternalStore(_) => true,
            CompanyBotError::StoreTimeout { .. } => true,
            CompanyBotError::Protocol(_) => true,
            CompanyBotError::Quiz(_) => true,
            CompanyBotError::UserInput(_) => true,
            CompanyBotError::Serialization(_) => false,
            CompanyBotError::Io(_) => true,
        }
    }

    /// Whether the error comes from the durable store
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            CompanyBotError::Database(_)
                | CompanyBotError::ExternalStore(_)
                | CompanyBotError::StoreTimeout { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CompanyBotError::Migration(_) => ErrorSeverity::Critical,
            CompanyBotError::Config(_) => ErrorSeverity::Critical,
            CompanyBotError::Database(_) => ErrorSeverity::Warning,
            CompanyBotError::ExternalStore(_) => ErrorSeverity::Warning,
            CompanyBotError::StoreTimeout { .. } => ErrorSeverity::Warning,
            CompanyBotError::Protocol(_) => ErrorSeverity::Info,
            CompanyBotError::Quiz(_) => ErrorSeverity::Info,
            CompanyBotError::UserInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
