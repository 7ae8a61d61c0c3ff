//! Database service layer
//!
//! Postgres implementation of the persistence gateway

use async_trait::async_trait;
use tracing::debug;
use crate::database::{DatabasePool, QuizResultRepository, UserRepository};
use crate::models::{PersistedQuizResult, PersistedUserRecord};
use crate::services::PersistenceGateway;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub quiz_results: QuizResultRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            quiz_results: QuizResultRepository::new(pool),
        }
    }
}

#[async_trait]
impl PersistenceGateway for DatabaseService {
    async fn is_registered(&self, user_id: i64) -> Result<bool> {
        let registered = self.users.exists(user_id).await?;
        debug!(user_id = user_id, registered = registered, "Registry lookup");
        Ok(registered)
    }

    async fn save_user(&self, record: &PersistedUserRecord) -> Result<()> {
        self.users.upsert(record).await?;
        debug!(user_id = record.user_id, "User record saved");
        Ok(())
    }

    async fn save_quiz_result(&self, record: &PersistedQuizResult) -> Result<()> {
        self.quiz_results.insert(record).await?;
        debug!(user_id = record.user_id, quiz_key = %record.quiz_key, score = record.score, "Quiz result saved");
        Ok(())
    }
}
