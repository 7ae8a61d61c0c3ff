//! Test data builders
//!
//! Inbound events and a ready-made dialog setup for integration tests.

use std::sync::Arc;
use std::time::Duration;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use CompanyBot::handlers::{BotCommand, DialogRouter, EventKind, InboundEvent, SurfaceId};
use CompanyBot::services::{DurableWriter, RetryPolicy};
use CompanyBot::{QuizCatalog, SessionStore};
use super::memory_gateway::InMemoryGateway;

pub const CITIES: [&str; 4] = ["Москва", "Казань", "Ростов-на-Дону", "Нижний Новгород"];

/// Full name made of letters and a single space
pub fn fake_full_name() -> String {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    format!("{} {}", first, last.replace('\'', ""))
}

pub fn command(user_id: i64, command: BotCommand) -> InboundEvent {
    event(user_id, EventKind::Command(command))
}

pub fn text(user_id: i64, text: &str) -> InboundEvent {
    event(user_id, EventKind::Text(text.to_string()))
}

/// Button press on a message that is still accessible
pub fn press(user_id: i64, payload: &str) -> InboundEvent {
    event(
        user_id,
        EventKind::ButtonPress {
            payload: payload.to_string(),
            surface: Some(SurfaceId { chat_id: user_id, message_id: 100 }),
        },
    )
}

fn event(user_id: i64, kind: EventKind) -> InboundEvent {
    InboundEvent {
        user_id,
        chat_id: user_id,
        username: Some(format!("user{}", user_id)),
        display_name: format!("Telegram User {}", user_id),
        kind,
    }
}

/// Short timeouts so failing stores do not slow the suite down
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(Duration::from_millis(100), 2, Duration::from_millis(5))
}

pub struct TestDialog {
    pub router: Arc<DialogRouter>,
    pub gateway: Arc<InMemoryGateway>,
    pub sessions: Arc<SessionStore>,
}

impl TestDialog {
    pub fn new() -> Self {
        Self::with_gateway(InMemoryGateway::new())
    }

    pub fn with_gateway(gateway: InMemoryGateway) -> Self {
        let gateway = Arc::new(gateway);
        let sessions = Arc::new(SessionStore::new());
        let writer = DurableWriter::new(gateway.clone(), fast_policy());
        let router = DialogRouter::new(sessions.clone(), Arc::new(QuizCatalog::new()), writer)
            .expect("default menu must be valid");

        Self {
            router: Arc::new(router),
            gateway,
            sessions,
        }
    }

    /// Walk a user through the whole registration dialog
    pub async fn register(&self, user_id: i64, full_name: &str, city: &str) {
        self.router.handle(&command(user_id, BotCommand::Start)).await;
        self.router.handle(&text(user_id, full_name)).await;
        self.router.handle(&text(user_id, city)).await;
    }
}
