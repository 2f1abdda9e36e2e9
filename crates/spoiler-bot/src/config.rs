//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use discord_client::Color;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Discord configuration
    pub discord: DiscordConfig,

    /// Command syntax and limits
    #[serde(default)]
    pub command: CommandConfig,

    /// Embed styling
    #[serde(default)]
    pub style: StyleConfig,

    /// User-facing wording
    #[serde(default)]
    pub text: TextConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token for the `Authorization` header
    pub token: SecretString,

    /// REST API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Comma-separated ids of the channels to watch
    pub channels: String,

    /// Poll interval for messages
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl DiscordConfig {
    /// Channel ids to watch, split out of the comma-separated form.
    pub fn watch_channels(&self) -> Vec<String> {
        self.channels
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    /// Command prefix all invocations start with
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Command keyword following the prefix
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Character separating title from spoiler text
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Maximum title length in characters
    #[serde(default = "default_title_max_len")]
    pub title_max_len: usize,

    /// Maximum decode link length in characters
    #[serde(default = "default_url_max_len")]
    pub url_max_len: usize,

    /// Base the encoded spoiler is appended to, forming the decode link
    #[serde(default = "default_decode_url_base")]
    pub decode_url_base: String,
}

impl CommandConfig {
    /// Full invocation keyword, e.g. `!spoiler`.
    pub fn command(&self) -> String {
        format!("{}{}", self.prefix, self.keyword)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Help embed accent color
    #[serde(default = "default_accent")]
    pub help: Color,

    /// Spoiler embed accent color
    #[serde(default = "default_accent")]
    pub spoiler: Color,

    /// Overlength notice accent color
    #[serde(default = "default_accent")]
    pub error: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    /// Help embed title
    #[serde(default = "default_help_title")]
    pub help_title: String,

    /// Project page linked from the help embed
    #[serde(default = "default_homepage")]
    pub homepage: String,

    /// Overlength title notice, heading and body
    #[serde(default = "default_overlength_title_head")]
    pub overlength_title_head: String,
    #[serde(default = "default_overlength_title_body")]
    pub overlength_title_body: String,

    /// Overlength spoiler notice, heading and body
    #[serde(default = "default_overlength_spoiler_head")]
    pub overlength_spoiler_head: String,
    #[serde(default = "default_overlength_spoiler_body")]
    pub overlength_spoiler_body: String,

    /// Footer shown on overlength notices, ahead of the echoed message
    #[serde(default = "default_overlength_footer")]
    pub overlength_footer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default implementations
impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            keyword: default_keyword(),
            delimiter: default_delimiter(),
            title_max_len: default_title_max_len(),
            url_max_len: default_url_max_len(),
            decode_url_base: default_decode_url_base(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            help: default_accent(),
            spoiler: default_accent(),
            error: default_accent(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            help_title: default_help_title(),
            homepage: default_homepage(),
            overlength_title_head: default_overlength_title_head(),
            overlength_title_body: default_overlength_title_body(),
            overlength_spoiler_head: default_overlength_spoiler_head(),
            overlength_spoiler_body: default_overlength_spoiler_body(),
            overlength_footer: default_overlength_footer(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_api_base() -> String {
    "https://discord.com/api/v10".into()
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_prefix() -> String {
    "!".into()
}

fn default_keyword() -> String {
    "spoiler".into()
}

fn default_delimiter() -> char {
    '|'
}

fn default_title_max_len() -> usize {
    256
}

fn default_url_max_len() -> usize {
    2000
}

fn default_decode_url_base() -> String {
    "http://www.decode.org?q=".into()
}

fn default_accent() -> Color {
    Color(0x5b187c)
}

fn default_help_title() -> String {
    "SpoilerBot Help".into()
}

fn default_homepage() -> String {
    "https://bobbysig.github.io/SpoilerBot/".into()
}

fn default_overlength_title_head() -> String {
    "Your spoiler's title is too long!".into()
}

fn default_overlength_title_body() -> String {
    "Your spoiler's title is too long, please shorten it to 256 characters or less.".into()
}

fn default_overlength_spoiler_head() -> String {
    "Your spoiler is too long!".into()
}

fn default_overlength_spoiler_body() -> String {
    "Your spoiler is too long, please shorten it.".into()
}

fn default_overlength_footer() -> String {
    // Leading space intentional.
    " Here's your original message:".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Note: try_parsing(true) would turn snowflake channel ids
                    // into numbers and lose precision. Keep strings as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Help body with the live command syntax inlined.
    pub fn help_text(&self) -> String {
        format!(
            "Hi, I'm SpoilerBot! To have me handle your spoiler, send a message like \
             `{} title {} spoiler` where `title` is anything you want to show to \
             everyone and `spoiler` is anything that you want run through ROT13.",
            self.command.command(),
            self.command.delimiter
        )
    }
}
