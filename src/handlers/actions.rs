//! Callback payload grammar
//!
//! Payloads are `_`-delimited tokens:
//!
//! * `nav_<node>`
//! * `back_main`
//! * `about`
//! * `quiz_<quiz key>`
//! * `answer_<quiz key>_<question index>_<option index>`
//!
//! Quiz keys may contain `_` themselves, so answers are split from the right.

use crate::menu::NodeId;
use crate::utils::errors::ProtocolError;

/// Closed set of button actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NavigateTo(NodeId),
    StartQuiz(String),
    SubmitAnswer { quiz_key: String, question: usize, option: usize },
    ShowAbout,
    BackToMain,
}

impl Action {
    pub fn parse(payload: &str) -> Result<Self, ProtocolError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(ProtocolError::Empty);
        }

        match payload {
            "back_main" => return Ok(Action::BackToMain),
            "about" => return Ok(Action::ShowAbout),
            _ => {}
        }

        if let Some(node) = payload.strip_prefix("nav_") {
            return NodeId::from_token(node)
                .map(Action::NavigateTo)
                .ok_or_else(|| ProtocolError::UnknownNode(node.to_string()));
        }

        if let Some(key) = payload.strip_prefix("quiz_") {
            if key.is_empty() {
                return Err(ProtocolError::Malformed(payload.to_string()));
            }
            return Ok(Action::StartQuiz(key.to_string()));
        }

        if let Some(rest) = payload.strip_prefix("answer_") {
            return parse_answer(rest).ok_or_else(|| ProtocolError::Malformed(payload.to_string()));
        }

        Err(ProtocolError::UnknownAction(payload.to_string()))
    }

    /// Encode as a callback payload
    pub fn payload(&self) -> String {
        match self {
            Action::NavigateTo(node) => format!("nav_{}", node.token()),
            Action::StartQuiz(key) => format!("quiz_{}", key),
            Action::SubmitAnswer { quiz_key, question, option } => {
                format!("answer_{}_{}_{}", quiz_key, question, option)
            }
            Action::ShowAbout => "about".to_string(),
            Action::BackToMain => "back_main".to_string(),
        }
    }

    /// Whether an unregistered user may trigger this action
    pub fn is_ungated(&self) -> bool {
        matches!(self, Action::BackToMain)
    }
}

fn parse_answer(rest: &str) -> Option<Action> {
    let mut parts = rest.rsplitn(3, '_');
    let option = parts.next()?.parse::<usize>().ok()?;
    let question = parts.next()?.parse::<usize>().ok()?;
    let quiz_key = parts.next().filter(|key| !key.is_empty())?;

    Some(Action::SubmitAnswer {
        quiz_key: quiz_key.to_string(),
        question,
        option,
    })
}
