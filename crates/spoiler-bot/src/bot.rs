//! The bot instance.

use crate::config::Config;
use crate::dispatch::{self, Messenger};
use crate::{gate, outcome, parser};
use discord_client::InboundMessage;
use std::sync::Arc;
use tracing::debug;

/// A spoiler bot wired to a messenger. Cheap to clone; messages are handled
/// independently with no shared mutable state, so concurrent handling is
/// safe.
#[derive(Clone)]
pub struct SpoilerBot {
    config: Arc<Config>,
    messenger: Arc<dyn Messenger>,
}

impl SpoilerBot {
    /// Create a bot from its configuration and outward transport.
    pub fn new(config: Arc<Config>, messenger: Arc<dyn Messenger>) -> Self {
        Self { config, messenger }
    }

    /// Run one message through the pipeline: admission gate, invocation
    /// check, parse, outcome resolution, dispatch. Rejections are silent;
    /// transport failures are consumed and logged inside the dispatcher, so
    /// this never returns an error to the caller.
    pub async fn handle(&self, message: InboundMessage) {
        if !gate::should_process(&message, &self.config.command) {
            return;
        }

        if !parser::is_invocation(&message.content, &self.config.command) {
            return;
        }

        let parsed = parser::parse(&message.content, &self.config.command);
        let outcome = outcome::resolve(parsed, &self.config.command);
        debug!(
            "Message {} from {} classified as {}",
            message.message_id,
            message.author_name,
            outcome.kind()
        );

        let steps = dispatch::plan(&outcome, &message, &self.config);
        dispatch::run(steps, &message, self.messenger.as_ref()).await;
    }
}
