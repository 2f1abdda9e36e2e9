//! Shared fixtures for unit tests.

use crate::config::{BotConfig, CommandConfig, Config, DiscordConfig, StyleConfig, TextConfig};
use crate::dispatch::Messenger;
use async_trait::async_trait;
use discord_client::{ChannelKind, CreateMessage, DiscordError, InboundMessage};
use secrecy::SecretString;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A guild text message from a human author.
pub(crate) fn inbound(content: &str) -> InboundMessage {
    InboundMessage {
        message_id: "9001".into(),
        channel_id: "1001".into(),
        channel_kind: ChannelKind::GuildText,
        author_id: "42".into(),
        author_name: "tester".into(),
        author_avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".into(),
        author_is_bot: false,
        content: content.into(),
    }
}

/// Default configuration with a dummy transport section.
pub(crate) fn test_config() -> Config {
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

/// One recorded messenger call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Direct(CreateMessage),
    Channel(CreateMessage),
    Delete {
        channel_id: String,
        message_id: String,
    },
}

/// In-memory `Messenger` that records every call. Direct sends consume a
/// queue of scripted results (empty queue means success); deletes fail
/// wholesale when asked to.
#[derive(Default)]
pub(crate) struct FakeMessenger {
    calls: Mutex<Vec<Call>>,
    direct_results: Mutex<VecDeque<bool>>,
    fail_deletes: bool,
}

impl FakeMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `n` direct sends.
    pub fn failing_direct_sends(n: usize) -> Self {
        let fake = Self::default();
        fake.direct_results
            .lock()
            .unwrap()
            .extend(std::iter::repeat(false).take(n));
        fake
    }

    /// Let `n` direct sends succeed, then fail the next one.
    pub fn fail_direct_after(&self, n: usize) {
        let mut results = self.direct_results.lock().unwrap();
        results.extend(std::iter::repeat(true).take(n));
        results.push_back(false);
    }

    /// Fail every delete.
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next_direct_result(&self) -> bool {
        self.direct_results.lock().unwrap().pop_front().unwrap_or(true)
    }
}

fn transport_error() -> DiscordError {
    DiscordError::Api {
        status: 500,
        message: "scripted failure".into(),
    }
}

#[async_trait]
impl Messenger for FakeMessenger {
    async fn send_direct(
        &self,
        _user_id: &str,
        message: CreateMessage,
    ) -> Result<(), DiscordError> {
        self.calls.lock().unwrap().push(Call::Direct(message));
        if self.next_direct_result() {
            Ok(())
        } else {
            Err(transport_error())
        }
    }

    async fn send_channel(
        &self,
        _channel_id: &str,
        message: CreateMessage,
    ) -> Result<(), DiscordError> {
        self.calls.lock().unwrap().push(Call::Channel(message));
        Ok(())
    }

    async fn delete_original(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<(), DiscordError> {
        self.calls.lock().unwrap().push(Call::Delete {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
        });
        if self.fail_deletes {
            Err(transport_error())
        } else {
            Ok(())
        }
    }
}
