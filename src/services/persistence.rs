//! Persistence gateway
//!
//! The durable registry of users and quiz results sits behind [`PersistenceGateway`].
//! The dialog never talks to a gateway directly: every call goes through
//! [`DurableWriter`], which bounds each attempt with a timeout, retries a fixed
//! number of times and turns the final failure into a degraded-mode signal.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use crate::config::StoreConfig;
use crate::models::{PersistedQuizResult, PersistedUserRecord};
use crate::utils::errors::{CompanyBotError, Result};
use crate::utils::logging;

/// Durable registry of registered users and completed quizzes
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Whether a user row exists for this id
    async fn is_registered(&self, user_id: i64) -> Result<bool>;

    async fn save_user(&self, record: &PersistedUserRecord) -> Result<()>;

    async fn save_quiz_result(&self, record: &PersistedQuizResult) -> Result<()>;
}

/// Timeout and retry budget applied to every gateway call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    /// Total number of attempts, at least one
    pub attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(timeout: Duration, attempts: u32, backoff: Duration) -> Self {
        Self {
            timeout,
            attempts: attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.timeout(), config.retries + 1, config.retry_backoff())
    }

    /// Worst-case wall time spent on one call
    pub fn budget(&self) -> Duration {
        self.timeout * self.attempts + self.backoff * (self.attempts - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(3), 3, Duration::from_millis(200))
    }
}

/// Outcome of a durable write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    Saved,
    /// All attempts failed; the state only lives in memory
    Degraded,
}

impl Durability {
    pub fn is_saved(&self) -> bool {
        matches!(self, Durability::Saved)
    }
}

/// Gateway wrapper that never lets a store failure reach the dialog
#[derive(Clone)]
pub struct DurableWriter {
    gateway: Arc<dyn PersistenceGateway>,
    policy: RetryPolicy,
}

impl DurableWriter {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, policy: RetryPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Registry lookup; `None` when the store could not answer
    pub async fn is_registered(&self, user_id: i64) -> Option<bool> {
        let gateway = self.gateway.clone();
        match self
            .call("is_registered", user_id, || {
                let gateway = gateway.clone();
                async move { gateway.is_registered(user_id).await }
            })
            .await
        {
            Ok(registered) => Some(registered),
            Err(e) => {
                logging::log_degraded(user_id, "is_registered", &e);
                None
            }
        }
    }

    pub async fn save_user(&self, record: &PersistedUserRecord) -> Durability {
        let gateway = self.gateway.clone();
        let result = self
            .call("save_user", record.user_id, || {
                let gateway = gateway.clone();
                let record = record.clone();
                async move { gateway.save_user(&record).await }
            })
            .await;
        self.durability(record.user_id, "save_user", result)
    }

    pub async fn save_quiz_result(&self, record: &PersistedQuizResult) -> Durability {
        let gateway = self.gateway.clone();
        let result = self
            .call("save_quiz_result", record.user_id, || {
                let gateway = gateway.clone();
                let record = record.clone();
                async move { gateway.save_quiz_result(&record).await }
            })
            .await;
        self.durability(record.user_id, "save_quiz_result", result)
    }

    fn durability(&self, user_id: i64, operation: &str, result: Result<()>) -> Durability {
        match result {
            Ok(()) => Durability::Saved,
            Err(e) => {
                logging::log_degraded(user_id, operation, &e);
                Durability::Degraded
            }
        }
    }

    async fn call<T, F, Fut>(&self, operation: &str, user_id: i64, mut attempt_fn: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 1..=self.policy.attempts {
            let started = Instant::now();
            let outcome = match tokio::time::timeout(self.policy.timeout, attempt_fn()).await {
                Ok(result) => result,
                Err(_) => Err(CompanyBotError::StoreTimeout {
                    operation: operation.to_string(),
                    timeout_ms: self.policy.timeout.as_millis() as u64,
                }),
            };
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(value) => {
                    logging::log_store_operation(operation, user_id, attempt, elapsed_ms, true);
                    return Ok(value);
                }
                Err(e) => {
                    logging::log_store_operation(operation, user_id, attempt, elapsed_ms, false);
                    last_error = Some(e);
                    if attempt < self.policy.attempts {
                        tokio::time::sleep(self.policy.backoff).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            CompanyBotError::ExternalStore(format!("{} made no attempts", operation))
        }))
    }
}

impl std::fmt::Debug for DurableWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableWriter")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls of every kind, then succeeds
    struct FlakyGateway {
        failures: u32,
        calls: AtomicU32,
        delay: Option<Duration>,
    }

    impl FlakyGateway {
        fn new(failures: u32) -> Self {
            Self { failures, calls: AtomicU32::new(0), delay: None }
        }

        async fn step(&self) -> Result<()> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(CompanyBotError::ExternalStore("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl PersistenceGateway for FlakyGateway {
        async fn is_registered(&self, _user_id: i64) -> Result<bool> {
            self.step().await.map(|_| true)
        }

        async fn save_user(&self, _record: &PersistedUserRecord) -> Result<()> {
            self.step().await
        }

        async fn save_quiz_result(&self, _record: &PersistedQuizResult) -> Result<()> {
            self.step().await
        }
    }

    fn fast_policy(attempts: u32) -> RetryPolicy {
        RetryPolicy::new(Duration::from_millis(50), attempts, Duration::from_millis(1))
    }

    fn record() -> PersistedUserRecord {
        PersistedUserRecord::new(7, Some("anna".to_string()), "Anna Petrova".to_string(), "Moscow".to_string())
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let gateway = Arc::new(FlakyGateway::new(2));
        let writer = DurableWriter::new(gateway.clone(), fast_policy(3));

        assert_eq!(writer.save_user(&record()).await, Durability::Saved);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_degrade() {
        let gateway = Arc::new(FlakyGateway::new(10));
        let writer = DurableWriter::new(gateway.clone(), fast_policy(2));

        assert_eq!(writer.save_user(&record()).await, Durability::Degraded);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);
        assert_eq!(writer.is_registered(7).await, None);
    }

    #[tokio::test]
    async fn test_slow_gateway_times_out() {
        let gateway = Arc::new(FlakyGateway {
            failures: 0,
            calls: AtomicU32::new(0),
            delay: Some(Duration::from_millis(500)),
        });
        let writer = DurableWriter::new(gateway, fast_policy(1));

        let started = Instant::now();
        assert_eq!(writer.is_registered(7).await, None);
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[test]
    fn test_policy_from_config() {
        let config = StoreConfig {
            timeout_ms: 1000,
            retries: 2,
            retry_backoff_ms: 100,
            ..StoreConfig::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.budget(), Duration::from_millis(3200));
        assert_eq!(RetryPolicy::new(Duration::from_secs(1), 0, Duration::ZERO).attempts, 1);
    }
}
