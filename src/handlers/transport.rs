//! Transport-neutral event and render types
//!
//! The dialog consumes [`InboundEvent`]s and answers with [`Reply`]s that are
//! delivered through a [`ChatTransport`]. Telegram is the production
//! implementation; tests plug in a recording transport.

use async_trait::async_trait;
use crate::utils::errors::Result;

/// A rendered bot message that can be edited later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId {
    pub chat_id: i64,
    pub message_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Inline keyboard, one inner vector per row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// One button per row
    pub fn column(buttons: Vec<Button>) -> Self {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}

/// Text plus optional keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Screen {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Bot commands understood by the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    About,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Command(BotCommand),
    Text(String),
    ButtonPress {
        payload: String,
        /// Message the button belongs to, if still accessible
        surface: Option<SurfaceId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user_id: i64,
    pub chat_id: i64,
    pub username: Option<String>,
    pub display_name: String,
    pub kind: EventKind,
}

/// One render step produced by the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Append a new surface
    Send(Screen),
    /// Replace the content of an existing surface
    Edit { surface: SurfaceId, screen: Screen },
}

impl Reply {
    pub fn screen(&self) -> &Screen {
        match self {
            Reply::Send(screen) => screen,
            Reply::Edit { screen, .. } => screen,
        }
    }
}

/// Outbound side of the chat
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<SurfaceId>;

    async fn edit(&self, surface: SurfaceId, text: &str, keyboard: Option<&Keyboard>) -> Result<()>;
}
