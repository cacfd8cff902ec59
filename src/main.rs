use std::process;
use std::sync::Arc;
use std::time::Duration;

use uludag_market_bot::application::messaging::{MessageParser, SessionDispatcher};
use uludag_market_bot::application::services::{CheckoutService, InteractionController};
use uludag_market_bot::domain::traits::{Bot, OrderStore, SessionStore};
use uludag_market_bot::infrastructure::adapters::TelegramAdapter;
use uludag_market_bot::infrastructure::catalog::load_catalog;
use uludag_market_bot::infrastructure::config::Config;
use uludag_market_bot::infrastructure::storage::MemorySessionStore;
use uludag_market_bot::infrastructure::supabase::SupabaseStore;

/// Pause after a failed getUpdates call
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run_bot(config)) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

async fn run_bot(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loaded configuration: {:?}", config);

    let catalog = Arc::new(load_catalog(config.catalog_path.as_deref())?);
    tracing::info!("Catalog loaded with {} products", catalog.len());

    let mut adapter = TelegramAdapter::new(&config.bot_token, config.polling)?;
    tracing::info!("Starting Telegram bot (token: {})", adapter.token_hint());
    adapter.fetch_bot_info().await?;
    if let Err(e) = adapter.register_commands().await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let info = adapter.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let store = SupabaseStore::new(&config.supabase, config.polling.request_timeout)?;
    tracing::info!("Orders go to {}", store.endpoint());

    let bot = Arc::new(adapter);
    let store: Arc<dyn OrderStore> = Arc::new(store);
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    let checkout = CheckoutService::new(store, bot.clone(), &config.admin_chat_id)
        .with_notify_policy(config.notify);
    let controller = Arc::new(InteractionController::new(catalog, sessions, bot.clone(), checkout));
    let dispatcher = SessionDispatcher::new(controller);
    let parser = MessageParser::new().with_bot_username(info.username);

    tokio::select! {
        _ = poll_updates(&bot, &parser, &dispatcher) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        }
    }

    dispatcher.shutdown().await;
    Ok(())
}

async fn poll_updates(bot: &TelegramAdapter, parser: &MessageParser, dispatcher: &SessionDispatcher) {
    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        match bot.get_updates(offset).await {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::info!("Received {} updates", updates.len());
                }
                for update in &updates {
                    match update.to_event(parser) {
                        Some(event) => dispatcher.dispatch(event).await,
                        None => tracing::debug!("Skipping update {}", update.update_id),
                    }
                }

                offset = TelegramAdapter::get_next_offset(&updates, offset);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(POLL_ERROR_BACKOFF).await;
            }
        }
    }
}
