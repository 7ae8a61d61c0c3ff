//! Telegram transport tests against a mocked Bot API

mod helpers;

use helpers::*;
use CompanyBot::handlers::{Button, ChatTransport, Keyboard, SurfaceId, TelegramTransport};

#[tokio::test]
async fn test_send_returns_surface_and_posts_keyboard() {
    let mock = TelegramMockServer::new().await;
    mock.mock_send_message(4242, 77).await;
    let transport = TelegramTransport::new(mock.bot());

    let keyboard = Keyboard::column(vec![Button::new("📚 Обучение", "nav_training")]);
    let surface = transport.send(4242, "🏠 Главное меню", Some(&keyboard)).await.unwrap();
    assert_eq!(surface, SurfaceId { chat_id: 4242, message_id: 77 });

    let bodies = mock.request_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["chat_id"], 4242);
    assert_eq!(bodies[0]["text"], "🏠 Главное меню");
    assert_eq!(
        bodies[0]["reply_markup"]["inline_keyboard"][0][0]["callback_data"],
        "nav_training"
    );
}

#[tokio::test]
async fn test_edit_targets_surface() {
    let mock = TelegramMockServer::new().await;
    mock.mock_edit_message_text(4242, 77).await;
    let transport = TelegramTransport::new(mock.bot());

    let surface = SurfaceId { chat_id: 4242, message_id: 77 };
    transport.edit(surface, "📚 Обучение", None).await.unwrap();

    let bodies = mock.request_bodies().await;
    assert_eq!(bodies[0]["message_id"], 77);
    assert_eq!(bodies[0]["text"], "📚 Обучение");
}

#[tokio::test]
async fn test_edit_error_is_reported() {
    let mock = TelegramMockServer::new().await;
    mock.mock_edit_message_text_error().await;
    let transport = TelegramTransport::new(mock.bot());

    let result = transport.edit(SurfaceId { chat_id: 1, message_id: 2 }, "x", None).await;
    assert!(matches!(result, Err(CompanyBot::CompanyBotError::Telegram(_))));
}
