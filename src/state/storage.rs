//! Session storage
//!
//! In-memory map of user sessions. Each session sits behind its own
//! `tokio::sync::Mutex`, so work for one user is serialized while different
//! users proceed in parallel. The outer map lock is only held long enough to
//! find or insert a session handle.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;
use super::session::{ConversationState, UserSession};

type SessionHandle = Arc<Mutex<UserSession>>;

/// Exclusive access to one user's session
#[derive(Debug)]
pub struct SessionGuard {
    guard: OwnedMutexGuard<UserSession>,
    fresh: bool,
}

impl SessionGuard {
    /// Whether the session was created by the lock call that produced this guard
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }
}

impl Deref for SessionGuard {
    type Target = UserSession;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn handle(&self, user_id: i64) -> (SessionHandle, bool) {
        if let Some(handle) = self.sessions.read().await.get(&user_id) {
            return (handle.clone(), false);
        }

        let mut sessions = self.sessions.write().await;
        // Another task may have inserted it between the two locks
        if let Some(handle) = sessions.get(&user_id) {
            return (handle.clone(), false);
        }

        debug!(user_id = user_id, "Creating new session");
        let handle = Arc::new(Mutex::new(UserSession::new(user_id)));
        sessions.insert(user_id, handle.clone());
        (handle, true)
    }

    /// Lock a user's session, creating it if absent
    pub async fn lock(&self, user_id: i64) -> SessionGuard {
        let (handle, fresh) = self.handle(user_id).await;
        SessionGuard {
            guard: handle.lock_owned().await,
            fresh,
        }
    }

    /// Snapshot of a user's session
    pub async fn get(&self, user_id: i64) -> UserSession {
        self.lock(user_id).await.clone()
    }

    /// Apply `f` to a user's session under its lock
    pub async fn mutate<F, R>(&self, user_id: i64, f: F) -> R
    where
        F: FnOnce(&mut UserSession) -> R,
    {
        let mut guard = self.lock(user_id).await;
        f(&mut guard)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Number of sessions per conversation state
    pub async fn state_counts(&self) -> HashMap<ConversationState, usize> {
        let handles: Vec<SessionHandle> = self.sessions.read().await.values().cloned().collect();

        let mut counts = HashMap::new();
        for handle in handles {
            let state = handle.lock().await.state;
            *counts.entry(state).or_insert(0) += 1;
        }
        counts
    }
}
