//! Registration scenario
//!
//! The registration dialog asks for two free-text answers. Each step carries
//! its own validation rules; rejected input never changes the session.

use regex::Regex;
use crate::utils::errors::{CompanyBotError, Result};
use super::session::{ConversationState, UserSession};

/// Validation rules for one text step
#[derive(Debug, Clone)]
pub struct StepValidation {
    /// Minimum length in characters
    pub min_length: usize,
    /// Maximum length in characters
    pub max_length: usize,
    pub pattern: Option<Regex>,
    pub error_message: &'static str,
}

impl StepValidation {
    /// Trim and check `input`, returning the accepted value
    pub fn validate(&self, input: &str) -> Result<String> {
        let value = input.trim();
        let length = value.chars().count();

        if length < self.min_length || length > self.max_length {
            return Err(CompanyBotError::UserInput(self.error_message.to_string()));
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(value) {
                return Err(CompanyBotError::UserInput(self.error_message.to_string()));
            }
        }

        Ok(value.to_string())
    }
}

/// Outcome of feeding one text message into the registration dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStep {
    /// Full name accepted, city expected next
    FullNameAccepted,
    /// City accepted, registration is complete
    Completed,
}

#[derive(Debug, Clone)]
pub struct RegistrationScenario {
    full_name: StepValidation,
    city: StepValidation,
}

impl RegistrationScenario {
    pub fn new() -> Result<Self> {
        let city_pattern = Regex::new(r"^[\p{L}][\p{L}\s.\-]*$")
            .map_err(|e| CompanyBotError::Config(format!("Invalid city pattern: {}", e)))?;

        Ok(Self {
            full_name: StepValidation {
                min_length: 2,
                max_length: 100,
                pattern: None,
                error_message: "Пожалуйста, введите ФИО (от 2 до 100 символов).",
            },
            city: StepValidation {
                min_length: 2,
                max_length: 60,
                pattern: Some(city_pattern),
                error_message: "Пожалуйста, введите название города (от 2 до 60 символов, только буквы, пробелы, дефисы и точки).",
            },
        })
    }

    /// Apply a text answer to a session that is waiting for one.
    ///
    /// Returns `Ok(None)` when the session does not expect text.
    pub fn accept_text(&self, session: &mut UserSession, input: &str) -> Result<Option<RegistrationStep>> {
        match session.state {
            ConversationState::AwaitingFullName => {
                let full_name = self.full_name.validate(input)?;
                session.set_full_name(full_name);
                Ok(Some(RegistrationStep::FullNameAccepted))
            }
            ConversationState::AwaitingCity => {
                let city = self.city.validate(input)?;
                session.complete_registration(city);
                Ok(Some(RegistrationStep::Completed))
            }
            ConversationState::Unregistered | ConversationState::Registered => Ok(None),
        }
    }
}
