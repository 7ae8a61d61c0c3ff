//! Data models module
//!
//! Rows written to the external store

pub mod user;
pub mod quiz_result;

// Re-export commonly used models
pub use user::PersistedUserRecord;
pub use quiz_result::PersistedQuizResult;
