//! Telegram binding
//!
//! Converts teloxide updates into [`InboundEvent`]s and implements
//! [`ChatTransport`] on top of the Bot API.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, Message, MessageId, User};
use teloxide::utils::command::BotCommands;
use tracing::debug;
use crate::handlers::transport::{
    BotCommand, ChatTransport, EventKind, InboundEvent, Keyboard, SurfaceId,
};
use crate::utils::errors::Result;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "регистрация и главное меню")]
    Start,
    #[command(description = "справка")]
    Help,
    #[command(description = "информация о боте")]
    About,
}

impl From<Command> for BotCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Start => BotCommand::Start,
            Command::Help => BotCommand::Help,
            Command::About => BotCommand::About,
        }
    }
}

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

pub fn to_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.payload.clone()))
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<SurfaceId> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        let message = request.await?;

        Ok(SurfaceId {
            chat_id: message.chat.id.0,
            message_id: message.id.0,
        })
    }

    async fn edit(&self, surface: SurfaceId, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        let mut request = self
            .bot
            .edit_message_text(ChatId(surface.chat_id), MessageId(surface.message_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        request.await?;
        Ok(())
    }
}

fn display_name(user: &User) -> String {
    user.full_name()
}

/// Event for a command or a plain text message. Non-text messages yield `None`.
pub fn event_from_message(msg: &Message, command: Option<Command>) -> Option<InboundEvent> {
    let user = msg.from.as_ref()?;

    let kind = match command {
        Some(command) => EventKind::Command(command.into()),
        None => EventKind::Text(msg.text()?.to_string()),
    };

    Some(InboundEvent {
        user_id: user.id.0 as i64,
        chat_id: msg.chat.id.0,
        username: user.username.clone(),
        display_name: display_name(user),
        kind,
    })
}

/// Event for an inline button press. Queries without data yield `None`.
pub fn event_from_callback(query: &CallbackQuery) -> Option<InboundEvent> {
    let payload = query.data.clone()?;
    let user = &query.from;

    let surface = query.message.as_ref().map(|message| SurfaceId {
        chat_id: message.chat().id.0,
        message_id: message.id().0,
    });
    let chat_id = surface.map(|s| s.chat_id).unwrap_or(user.id.0 as i64);

    debug!(user_id = user.id.0, payload = %payload, "Callback received");

    Some(InboundEvent {
        user_id: user.id.0 as i64,
        chat_id,
        username: user.username.clone(),
        display_name: display_name(user),
        kind: EventKind::ButtonPress { payload, surface },
    })
}
