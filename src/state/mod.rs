//! State management module
//!
//! This module handles per-user conversation sessions and the registration dialog

pub mod scenarios;
pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use scenarios::{RegistrationScenario, RegistrationStep, StepValidation};
pub use session::{ConversationState, UserSession};
pub use storage::{SessionGuard, SessionStore};
