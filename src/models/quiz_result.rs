//! Quiz result model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PersistedQuizResult {
    pub user_id: i64,
    pub full_name: String,
    pub quiz_key: String,
    pub quiz_name: String,
    pub score: i32,
    pub max_score: i32,
    pub completed_at: DateTime<Utc>,
    /// One entry per question, `true` when answered correctly
    pub answer_sequence: Vec<bool>,
}

impl PersistedQuizResult {
    /// Answers rendered as a compact `+`/`-` string, e.g. `+-+`
    pub fn answer_string(&self) -> String {
        self.answer_sequence
            .iter()
            .map(|correct| if *correct { '+' } else { '-' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_string() {
        let result = PersistedQuizResult {
            user_id: 1,
            full_name: "Anna Petrova".to_string(),
            quiz_key: "test_order".to_string(),
            quiz_name: "Order intake".to_string(),
            score: 1,
            max_score: 2,
            completed_at: Utc::now(),
            answer_sequence: vec![true, false],
        };
        assert_eq!(result.answer_string(), "+-");
    }
}
