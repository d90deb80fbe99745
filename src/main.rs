//! # Game Poll Bot Main Entry Point
//!
//! Initializes logging, loads configuration and the roster, computes the
//! day's deadline, then runs the Telegram dispatcher next to the health server.
//! On shutdown the vote history is saved if a round is still open.

use anyhow::{anyhow, Result};
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_poll_bot::bot::handlers::BotHandler;
use game_poll_bot::config::Config;
use game_poll_bot::services::health::HealthService;
use game_poll_bot::services::{CoordinatorSettings, SessionCoordinator, TelegramBroadcaster};
use game_poll_bot::storage::RosterStore;
use game_poll_bot::utils::datetime::{deadline_on_day, format_datetime, now_in};
use game_poll_bot::voting::VotingSession;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "game_poll_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Game Poll Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Roster: {}, Admin: {}, HTTP Port: {}",
        config.roster_path.display(), config.admin_username, config.http_port);

    // Load roster; the bot is useless without it
    let store = RosterStore::new(&config.roster_path);
    let participants = match store.load() {
        Ok(participants) => participants,
        Err(e) => {
            tracing::error!("Cannot start without a roster: {}", e);
            return Err(e.into());
        }
    };
    info!("Roster loaded with {} participants", participants.len());

    let deadline = deadline_on_day(now_in(config.timezone), config.deadline_hour)
        .ok_or_else(|| anyhow!("Deadline {}:00 does not exist today in {}", config.deadline_hour, config.timezone))?;
    info!("Voting deadline: {}", format_datetime(&deadline));

    let session = VotingSession::new(participants, deadline).into_shared();

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let coordinator = Arc::new(SessionCoordinator::new(
        session.clone(),
        Arc::new(TelegramBroadcaster::new(bot.clone())),
        store,
        CoordinatorSettings {
            admin_username: config.admin_username.clone(),
            timezone: config.timezone,
            reminder_lead: config.reminder_lead(),
            persist_on_stop: config.persist_on_stop,
        },
    ));
    let handler = BotHandler::new(coordinator.clone());
    info!("Telegram bot initialized successfully");

    // Initialize health service
    let health_service = HealthService::new(session);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            // One queue for every update, so votes are applied in arrival order
            .distribution_function(|_| Some(()))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Flush vote history if a round is still open
    coordinator.shutdown().await;

    info!("Application stopped");
    Ok(())
}
