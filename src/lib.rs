//! CompanyBot Telegram Bot
//!
//! A Telegram bot for onboarding company staff. It registers new employees,
//! walks them through training materials and checks what they learned with
//! short quizzes. Results are stored in Postgres when it is reachable.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod health;
pub mod menu;
pub mod models;
pub mod quiz;
pub mod services;
pub mod state;
pub mod texts;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CompanyBotError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{DialogRouter, TelegramTransport};
pub use quiz::QuizCatalog;
pub use services::{DurableWriter, PersistenceGateway, RetryPolicy};
pub use state::SessionStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
