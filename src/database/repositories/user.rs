//! User repository implementation

use sqlx::PgPool;
use crate::models::PersistedUserRecord;
use crate::utils::errors::CompanyBotError;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user, or refresh the profile of an existing one
    pub async fn upsert(&self, record: &PersistedUserRecord) -> Result<(), CompanyBotError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, full_name, city, registered_at, last_activity_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE
            SET username = EXCLUDED.username,
                full_name = EXCLUDED.full_name,
                city = EXCLUDED.city,
                last_activity_at = EXCLUDED.last_activity_at
            "#
        )
        .bind(record.user_id)
        .bind(&record.username)
        .bind(&record.full_name)
        .bind(&record.city)
        .bind(record.registered_at)
        .bind(record.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Check whether a user row exists
    pub async fn exists(&self, user_id: i64) -> Result<bool, CompanyBotError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }

    /// Find user by Telegram ID
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<PersistedUserRecord>, CompanyBotError> {
        let user = sqlx::query_as::<_, PersistedUserRecord>(
            "SELECT user_id, username, full_name, city, registered_at, last_activity_at FROM users WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, CompanyBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
