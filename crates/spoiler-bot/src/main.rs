//! SpoilerBot - Main entry point.

use anyhow::Context;
use discord_client::{DiscordClient, MessageReceiver};
use secrecy::ExposeSecret;
use spoiler_bot::error::AppResult;
use spoiler_bot::{Config, SpoilerBot};
use std::sync::Arc;
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting SpoilerBot...");

    // A panicking message task must not die silently.
    std::panic::set_hook(Box::new(|panic| {
        error!("Unhandled panic: {}", panic);
    }));

    // Initialize the Discord client
    let client = DiscordClient::new(
        &config.discord.api_base,
        config.discord.token.expose_secret(),
    )
    .context("Failed to create Discord client")?;

    // Credential check
    match client.current_user().await {
        Ok(me) => info!("Authenticated as {}", me.username),
        Err(e) => {
            error!(
                "Discord API not reachable at {}: {}",
                config.discord.api_base, e
            );
            return Err(e.into());
        }
    }

    let channels = config.discord.watch_channels();
    if channels.is_empty() {
        return Err(anyhow::anyhow!("No channels configured to watch").into());
    }
    info!("Watching {} channel(s)", channels.len());

    // Start message receiver
    let receiver = MessageReceiver::new(client.clone(), channels, config.discord.poll_interval);
    let bot = SpoilerBot::new(Arc::new(config), Arc::new(client));

    let mut stream = Box::pin(receiver.stream());

    info!("Listening for messages...");

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                let bot = bot.clone();
                tokio::spawn(async move {
                    bot.handle(message).await;
                });
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
