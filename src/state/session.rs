//! Per-user conversation session
//!
//! A session lives in memory for the lifetime of the process. All state
//! changes go through the methods below so that a quiz attempt can only
//! exist while the user is registered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::quiz::QuizAttempt;

/// Where the user is in the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversationState {
    Unregistered,
    AwaitingFullName,
    AwaitingCity,
    Registered,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Unregistered => "unregistered",
            ConversationState::AwaitingFullName => "awaiting_full_name",
            ConversationState::AwaitingCity => "awaiting_city",
            ConversationState::Registered => "registered",
        }
    }

    /// Whether free text is the expected input in this state
    pub fn expects_text(&self) -> bool {
        matches!(self, ConversationState::AwaitingFullName | ConversationState::AwaitingCity)
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: i64,
    pub state: ConversationState,
    pub full_name: Option<String>,
    pub city: Option<String>,
    pub username: Option<String>,
    active_quiz: Option<QuizAttempt>,
    /// Registry has been consulted for this session
    pub reconciled: bool,
    /// The user record reached the durable store
    pub durably_saved: bool,
    pub last_activity_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            state: ConversationState::Unregistered,
            full_name: None,
            city: None,
            username: None,
            active_quiz: None,
            reconciled: false,
            durably_saved: false,
            last_activity_at: Utc::now(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.state == ConversationState::Registered
    }

    pub fn active_quiz(&self) -> Option<&QuizAttempt> {
        self.active_quiz.as_ref()
    }

    /// Mutable access to the quiz slot, only handed out to registered users
    pub fn quiz_slot(&mut self) -> Option<&mut Option<QuizAttempt>> {
        if self.is_registered() {
            Some(&mut self.active_quiz)
        } else {
            None
        }
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Start registration from scratch
    pub fn begin_registration(&mut self) {
        self.state = ConversationState::AwaitingFullName;
        self.full_name = None;
        self.city = None;
        self.active_quiz = None;
        self.durably_saved = false;
    }

    pub fn set_full_name(&mut self, full_name: String) {
        self.full_name = Some(full_name);
        self.state = ConversationState::AwaitingCity;
    }

    pub fn complete_registration(&mut self, city: String) {
        self.city = Some(city);
        self.state = ConversationState::Registered;
    }

    /// Promote a session whose user is already known to the registry
    pub fn mark_registered_from_registry(&mut self) {
        self.state = ConversationState::Registered;
        self.durably_saved = true;
    }

    /// Name to put on persisted records
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.full_name.as_deref().unwrap_or(fallback)
    }
}
