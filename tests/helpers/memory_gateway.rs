//! In-memory persistence gateway
//!
//! Stands in for Postgres in dialog tests. Failures and latency can be
//! switched on per operation, and every call is counted.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use CompanyBot::models::{PersistedQuizResult, PersistedUserRecord};
use CompanyBot::services::PersistenceGateway;
use CompanyBot::{CompanyBotError, Result};

#[derive(Default)]
pub struct InMemoryGateway {
    registered: Mutex<HashSet<i64>>,
    users: Mutex<Vec<PersistedUserRecord>>,
    results: Mutex<Vec<PersistedQuizResult>>,
    pub fail_lookups: AtomicBool,
    pub fail_saves: AtomicBool,
    delay: Mutex<Option<Duration>>,
    pub lookup_calls: AtomicUsize,
    pub save_user_calls: AtomicUsize,
    pub save_result_calls: AtomicUsize,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `user_id` was registered by an earlier process
    pub fn with_registered(user_id: i64) -> Self {
        let gateway = Self::new();
        gateway.registered.lock().unwrap().insert(user_id);
        gateway
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn users(&self) -> Vec<PersistedUserRecord> {
        self.users.lock().unwrap().clone()
    }

    pub fn results(&self) -> Vec<PersistedQuizResult> {
        self.results.lock().unwrap().clone()
    }

    pub fn save_user_calls(&self) -> usize {
        self.save_user_calls.load(Ordering::SeqCst)
    }

    pub fn save_result_calls(&self) -> usize {
        self.save_result_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn is_registered(&self, user_id: i64) -> Result<bool> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(CompanyBotError::ExternalStore("registry offline".to_string()));
        }
        Ok(self.registered.lock().unwrap().contains(&user_id))
    }

    async fn save_user(&self, record: &PersistedUserRecord) -> Result<()> {
        self.save_user_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CompanyBotError::ExternalStore("users table unavailable".to_string()));
        }
        self.registered.lock().unwrap().insert(record.user_id);
        self.users.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn save_quiz_result(&self, record: &PersistedQuizResult) -> Result<()> {
        self.save_result_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CompanyBotError::ExternalStore("quiz_results table unavailable".to_string()));
        }
        self.results.lock().unwrap().push(record.clone());
        Ok(())
    }
}
