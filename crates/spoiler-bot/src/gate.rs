//! Inbound admission gate.

use crate::config::CommandConfig;
use discord_client::{ChannelKind, InboundMessage};

/// Whether an incoming message is eligible for processing at all: not sent
/// by another bot, posted in a guild text channel, and starting with the
/// command prefix. Everything rejected here is dropped without a reply.
pub fn should_process(message: &InboundMessage, command: &CommandConfig) -> bool {
    !message.author_is_bot
        && message.channel_kind == ChannelKind::GuildText
        && message.content.starts_with(&command.prefix)
}
