//! Quiz result repository implementation

use sqlx::PgPool;
use crate::models::PersistedQuizResult;
use crate::utils::errors::CompanyBotError;

#[derive(Clone)]
#[derive(Debug)]
pub struct QuizResultRepository {
    pool: PgPool,
}

impl QuizResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a result. A retried write of the same attempt is a no-op.
    pub async fn insert(&self, record: &PersistedQuizResult) -> Result<(), CompanyBotError> {
        sqlx::query(
            r#"
            INSERT INTO quiz_results (user_id, full_name, quiz_key, quiz_name, score, max_score, completed_at, answer_sequence)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, quiz_key, completed_at) DO NOTHING
            "#
        )
        .bind(record.user_id)
        .bind(&record.full_name)
        .bind(&record.quiz_key)
        .bind(&record.quiz_name)
        .bind(record.score)
        .bind(record.max_score)
        .bind(record.completed_at)
        .bind(&record.answer_sequence)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All results of one user, newest first
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<PersistedQuizResult>, CompanyBotError> {
        let results = sqlx::query_as::<_, PersistedQuizResult>(
            r#"
            SELECT user_id, full_name, quiz_key, quiz_name, score, max_score, completed_at, answer_sequence
            FROM quiz_results
            WHERE user_id = $1
            ORDER BY completed_at DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}
