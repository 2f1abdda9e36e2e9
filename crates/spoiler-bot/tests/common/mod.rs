//! Common test utilities for integration tests.

use discord_client::{ChannelKind, DiscordClient, InboundMessage};
use secrecy::SecretString;
use spoiler_bot::config::{
    BotConfig, CommandConfig, Config, DiscordConfig, StyleConfig, TextConfig,
};
use std::time::Duration;
use wiremock::MockServer;

/// Create a Discord client pointed at a mock server.
pub fn test_client(mock_server: &MockServer) -> DiscordClient {
    DiscordClient::new(mock_server.uri(), "test-token").unwrap()
}

/// Default configuration; the transport section points nowhere real.
pub fn test_config() -> Config {
    Config {
        discord: DiscordConfig {
            token: SecretString::new("test-token".into()),
            api_base: "https://discord.invalid/api/v10".into(),
            channels: "1001".into(),
            poll_interval: Duration::from_secs(2),
        },
        command: CommandConfig::default(),
        style: StyleConfig::default(),
        text: TextConfig::default(),
        bot: BotConfig::default(),
    }
}

/// A guild text message from a human author.
pub fn guild_message(content: &str) -> InboundMessage {
    InboundMessage {
        message_id: "9001".into(),
        channel_id: "1001".into(),
        channel_kind: ChannelKind::GuildText,
        author_id: "42".into(),
        author_name: "alice".into(),
        author_avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".into(),
        author_is_bot: false,
        content: content.into(),
    }
}
