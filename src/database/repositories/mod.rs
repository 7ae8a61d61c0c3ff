//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod user;
pub mod quiz_result;

// Re-export repositories
pub use user::UserRepository;
pub use quiz_result::QuizResultRepository;
