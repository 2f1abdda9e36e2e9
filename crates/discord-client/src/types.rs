//! Discord REST API types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discord user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Avatar hash; absent when the user has no custom avatar.
    pub avatar: Option<String>,
    /// Set when the account belongs to an application.
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// CDN URL for the user's avatar, falling back to one of the stock
    /// avatars when no custom one is set.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!(
                "https://cdn.discordapp.com/avatars/{}/{}.png",
                self.id, hash
            ),
            None => {
                let index = self
                    .id
                    .parse::<u64>()
                    .map(|id| (id >> 22) % 6)
                    .unwrap_or(0);
                format!("https://cdn.discordapp.com/embed/avatars/{}.png", index)
            }
        }
    }
}

/// Channel kinds the bot distinguishes. Every other Discord channel type
/// collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum ChannelKind {
    GuildText,
    Dm,
    GuildVoice,
    Other,
}

impl From<u8> for ChannelKind {
    fn from(raw: u8) -> Self {
        match raw {
            0 => ChannelKind::GuildText,
            1 => ChannelKind::Dm,
            2 => ChannelKind::GuildVoice,
            _ => ChannelKind::Other,
        }
    }
}

/// Channel as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub name: Option<String>,
}

/// Message as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub author: User,
    #[serde(default)]
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Embed accent color. Discord encodes colors as integers on the wire;
/// configuration supplies them as `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let hex = raw.strip_prefix('#').unwrap_or(&raw);
        u32::from_str_radix(hex, 16).map(Color).map_err(|_| {
            serde::de::Error::custom(format!("invalid color `{}`, expected `#rrggbb`", raw))
        })
    }
}

/// Rich embed attached to an outgoing message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: impl Into<String>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url: Some(icon_url.into()),
        });
        self
    }

    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }
}

/// Outgoing message request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl CreateMessage {
    /// A plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    /// A message carrying a single embed.
    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

/// DM channel creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDmRequest {
    pub recipient_id: String,
}

/// Flattened view of a received message, tagged with the kind of channel it
/// arrived in. This is the read model the bot consumes.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub message_id: String,
    pub channel_id: String,
    pub channel_kind: ChannelKind,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar_url: String,
    pub author_is_bot: bool,
    pub content: String,
}

impl InboundMessage {
    /// Flatten an API message received in a channel of the given kind.
    pub fn from_message(message: &Message, channel_kind: ChannelKind) -> Self {
        Self {
            message_id: message.id.clone(),
            channel_id: message.channel_id.clone(),
            channel_kind,
            author_id: message.author.id.clone(),
            author_name: message.author.username.clone(),
            author_avatar_url: message.author.avatar_url(),
            author_is_bot: message.author.bot,
            content: message.content.clone(),
        }
    }
}
