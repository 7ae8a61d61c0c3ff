//! Chat transport that records what the bot would have shown

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use CompanyBot::handlers::{ChatTransport, Keyboard, SurfaceId};
use CompanyBot::{CompanyBotError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    Sent { chat_id: i64, text: String, keyboard: Option<Keyboard> },
    Edited { surface: SurfaceId, text: String, keyboard: Option<Keyboard> },
}

impl Delivered {
    pub fn text(&self) -> &str {
        match self {
            Delivered::Sent { text, .. } | Delivered::Edited { text, .. } => text,
        }
    }
}

#[derive(Default)]
pub struct RecordingTransport {
    log: Mutex<Vec<Delivered>>,
    next_message_id: AtomicI32,
    pub fail_edits: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<Delivered> {
        self.log.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.delivered().iter().map(|d| d.text().to_string()).collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<SurfaceId> {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.lock().unwrap().push(Delivered::Sent {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(SurfaceId { chat_id, message_id })
    }

    async fn edit(&self, surface: SurfaceId, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(CompanyBotError::ExternalStore("message can't be edited".to_string()));
        }
        self.log.lock().unwrap().push(Delivered::Edited {
            surface,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }
}
