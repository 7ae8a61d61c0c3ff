//! CompanyBot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::{prelude::*, types::{CallbackQuery, Update}};
use teloxide::dispatching::UpdateHandler;
use tracing::{info, warn, error};

use CompanyBot::{
    config::Settings,
    utils::logging,
    database::{DatabaseConfig, DatabaseService, create_pool, health_check, run_migrations},
    handlers::{
        telegram::{event_from_callback, event_from_message, Command},
        DialogRouter, TelegramTransport,
    },
    health,
    quiz::QuizCatalog,
    services::{DurableWriter, RetryPolicy},
    state::SessionStore,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", CompanyBot::info());

    // The pool connects lazily, so an unreachable store does not block startup
    info!("Preparing database pool...");
    let db_config = DatabaseConfig::from_store(&settings.store)?;
    let db_pool = create_pool(&db_config)?;

    match health_check(&db_pool).await {
        Ok(()) => info!("Database is reachable"),
        Err(e) => warn!(error = %e, degraded = true, "Database unreachable at startup"),
    }

    info!("Running database migrations...");
    if let Err(e) = run_migrations(&db_pool).await {
        warn!(error = %e, degraded = true, "Migrations failed, continuing with in-memory state");
    }

    let database_service = DatabaseService::new(db_pool);
    let writer = DurableWriter::new(Arc::new(database_service), RetryPolicy::from_config(&settings.store));

    let sessions = Arc::new(SessionStore::new());
    let catalog = Arc::new(QuizCatalog::new());
    let router = Arc::new(DialogRouter::new(sessions, catalog, writer)?);

    if settings.health.enabled {
        let health_config = settings.health.clone();
        tokio::spawn(async move {
            if let Err(e) = health::serve(&health_config).await {
                error!(error = %e, "Health endpoint stopped");
            }
        });
    }

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let transport = Arc::new(TelegramTransport::new(bot.clone()));

    info!("Setting up bot handlers...");
    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router, transport])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("CompanyBot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle regular messages
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

/// Handle bot commands
async fn handle_commands(
    msg: Message,
    cmd: Command,
    router: Arc<DialogRouter>,
    transport: Arc<TelegramTransport>,
) -> HandlerResult {
    if let Some(event) = event_from_message(&msg, Some(cmd)) {
        router.dispatch(&event, transport.as_ref()).await;
    }
    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    msg: Message,
    router: Arc<DialogRouter>,
    transport: Arc<TelegramTransport>,
) -> HandlerResult {
    if let Some(event) = event_from_message(&msg, None) {
        router.dispatch(&event, transport.as_ref()).await;
    }
    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: CallbackQuery,
    router: Arc<DialogRouter>,
    transport: Arc<TelegramTransport>,
) -> HandlerResult {
    // Acknowledge before dispatch, ignored payloads get no other answer
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(user_id = query.from.id.0, error = %e, "Failed to answer callback query");
    }

    if let Some(event) = event_from_callback(&query) {
        router.dispatch(&event, transport.as_ref()).await;
    }
    Ok(())
}
