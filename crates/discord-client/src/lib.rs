//! Minimal Discord REST API v10 client.
//!
//! Covers the surface a message bot needs: identifying the account, looking
//! up channels, listing and posting messages, deleting messages, and opening
//! DM channels. New messages are picked up by polling watched channels;
//! gateway websockets are out of scope.

mod client;
mod error;
mod receiver;
mod types;

pub use client::DiscordClient;
pub use error::DiscordError;
pub use receiver::MessageReceiver;
pub use types::*;
