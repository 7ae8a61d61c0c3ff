//! Bot handlers module
//!
//! This module contains the dialog and its adapters:
//! - Callback payload parsing
//! - Transport-neutral events and replies
//! - The dialog router
//! - The Telegram binding

pub mod actions;
pub mod router;
pub mod telegram;
pub mod transport;

// Re-export commonly used handler types
pub use actions::Action;
pub use router::DialogRouter;
pub use telegram::{Command, TelegramTransport};
pub use transport::{
    BotCommand, Button, ChatTransport, EventKind, InboundEvent, Keyboard, Reply, Screen, SurfaceId,
};
