//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Bot wired to this server
    pub fn bot(&self) -> teloxide::Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        teloxide::Bot::new(TEST_BOT_TOKEN).set_api_url(url)
    }

    fn private_message(chat_id: i64, message_id: i32, text: &str) -> Value {
        json!({
            "message_id": message_id,
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "CompanyBot",
                "username": "company_bot"
            },
            "chat": {
                "id": chat_id,
                "first_name": "Test",
                "type": "private"
            },
            "date": 1640995200,
            "text": text
        })
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, chat_id: i64, message_id: i32) {
        let body = json!({ "ok": true, "result": Self::private_message(chat_id, message_id, "ok") });

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/bot.+/sendmessage$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for editMessageText endpoint
    pub async fn mock_edit_message_text(&self, chat_id: i64, message_id: i32) {
        let mut message = Self::private_message(chat_id, message_id, "edited");
        message["edit_date"] = json!(1640995260);
        let body = json!({ "ok": true, "result": message });

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/bot.+/editmessagetext$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup a failing editMessageText endpoint
    pub async fn mock_edit_message_text_error(&self) {
        let body = json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: message to edit not found"
        });

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/bot.+/editmessagetext$"))
            .respond_with(ResponseTemplate::new(400).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all requests received so far
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
