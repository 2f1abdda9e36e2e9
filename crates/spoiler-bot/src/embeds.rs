//! Outward message builders.

use crate::config::Config;
use crate::outcome::Spoiler;
use discord_client::{Embed, InboundMessage};

/// The standard help embed.
pub fn help(config: &Config) -> Embed {
    Embed::new()
        .title(&config.text.help_title)
        .url(&config.text.homepage)
        .color(config.style.help)
        .description(config.help_text())
}

/// Notice for a title over the length limit.
pub fn title_too_long(config: &Config) -> Embed {
    overlength(
        &config.text.overlength_title_head,
        &config.text.overlength_title_body,
        config,
    )
}

/// Notice for a spoiler whose decode link is over the length limit.
pub fn spoiler_too_long(config: &Config) -> Embed {
    overlength(
        &config.text.overlength_spoiler_head,
        &config.text.overlength_spoiler_body,
        config,
    )
}

fn overlength(head: &str, body: &str, config: &Config) -> Embed {
    Embed::new()
        .title(head)
        .color(config.style.error)
        .description(body)
        .footer_text(&config.text.overlength_footer)
}

/// The public spoiler embed: author attribution, cleartext title, decode
/// link, ciphered text as the body.
pub fn spoiler(message: &InboundMessage, spoiler: &Spoiler, config: &Config) -> Embed {
    Embed::new()
        .author(&message.author_name, &message.author_avatar_url)
        .title(&spoiler.title)
        .url(&spoiler.link)
        .color(config.style.spoiler)
        .description(&spoiler.ciphered)
}
