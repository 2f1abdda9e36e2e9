//! SpoilerBot hides spoilers behind ROT13.
//!
//! The bot watches guild text channels for `!spoiler title | text`
//! invocations, republishes the spoiler as an embed whose body is the
//! ROT13-ciphered text with a decode link, deletes the original message,
//! and walks authors through mistakes over DM.

pub mod bot;
pub mod cipher;
pub mod config;
pub mod dispatch;
pub mod embeds;
pub mod error;
pub mod gate;
pub mod outcome;
pub mod parser;

#[cfg(test)]
pub(crate) mod testutil;

pub use bot::SpoilerBot;
pub use config::Config;
pub use error::{AppError, AppResult};
