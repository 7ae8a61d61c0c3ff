//! Database connection management

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use std::time::Duration;
use crate::config::StoreConfig;
use crate::utils::errors::{CompanyBotError, Result};

pub type DatabasePool = Pool<Postgres>;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
}

impl DatabaseConfig {
    /// Build pool settings from the store section, applying the credential blob
    pub fn from_store(store: &StoreConfig) -> Result<Self> {
        let credentials = store.parsed_credentials().map_err(|e| {
            CompanyBotError::Config(format!("Store credentials are not valid JSON: {}", e))
        })?;

        Ok(Self {
            url: store.url.clone(),
            username: credentials.as_ref().map(|c| c.username.clone()),
            password: credentials.map(|c| c.password),
            max_connections: store.max_connections,
            acquire_timeout: store.timeout(),
            ..Self::default()
        })
    }

    fn connect_options(&self) -> Result<PgConnectOptions> {
        let mut options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| CompanyBotError::Config(format!("Invalid store URL: {}", e)))?;

        if let Some(username) = &self.username {
            options = options.username(username);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/companybot".to_string(),
            username: None,
            password: None,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }
}

/// Create a lazily connecting pool.
///
/// No connection is opened here, so an unreachable store does not prevent startup.
pub fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_lazy_with(config.connect_options()?);

    tracing::info!("Database connection pool configured");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    Ok(())
}
