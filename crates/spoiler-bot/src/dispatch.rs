//! Response dispatch: one outcome becomes an ordered table of side effects.

use crate::config::Config;
use crate::embeds;
use crate::outcome::Outcome;
use async_trait::async_trait;
use discord_client::{CreateMessage, DiscordClient, DiscordError, Embed, InboundMessage};
use tracing::{debug, error};

/// Outward messaging capability the dispatcher runs against.
/// `DiscordClient` is the production implementation; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver a private message to a user.
    async fn send_direct(&self, user_id: &str, message: CreateMessage)
        -> Result<(), DiscordError>;

    /// Deliver a message to a channel.
    async fn send_channel(
        &self,
        channel_id: &str,
        message: CreateMessage,
    ) -> Result<(), DiscordError>;

    /// Remove the triggering message.
    async fn delete_original(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<(), DiscordError>;
}

#[async_trait]
impl Messenger for DiscordClient {
    async fn send_direct(
        &self,
        user_id: &str,
        message: CreateMessage,
    ) -> Result<(), DiscordError> {
        let dm = self.create_dm(user_id).await?;
        self.create_message(&dm.id, &message).await?;
        Ok(())
    }

    async fn send_channel(
        &self,
        channel_id: &str,
        message: CreateMessage,
    ) -> Result<(), DiscordError> {
        self.create_message(channel_id, &message).await?;
        Ok(())
    }

    async fn delete_original(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<(), DiscordError> {
        self.delete_message(channel_id, message_id).await
    }
}

/// One discrete outward action.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Diagnostic label for failure logs.
    pub label: &'static str,
    /// Skip this step when the step immediately before it failed.
    pub needs_prior: bool,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// DM the message author.
    Direct(CreateMessage),
    /// Post in the channel the command came from.
    Channel(CreateMessage),
    /// Delete the triggering message.
    DeleteOriginal,
}

impl Step {
    fn new(label: &'static str, action: Action) -> Self {
        Self {
            label,
            needs_prior: false,
            action,
        }
    }

    fn chained(label: &'static str, action: Action) -> Self {
        Self {
            label,
            needs_prior: true,
            action,
        }
    }
}

/// The ordered action table for an outcome. Every table ends by deleting
/// the triggering message.
pub fn plan(outcome: &Outcome, message: &InboundMessage, config: &Config) -> Vec<Step> {
    match outcome {
        Outcome::Help => vec![
            Step::new(
                "send help message",
                Action::Direct(CreateMessage::embed(embeds::help(config))),
            ),
            Step::new("delete original message", Action::DeleteOriginal),
        ],
        Outcome::TitleTooLong => overlength_plan(
            "send spoiler title too long message",
            embeds::title_too_long(config),
            message,
        ),
        Outcome::PayloadTooLong => overlength_plan(
            "send spoiler text too long message",
            embeds::spoiler_too_long(config),
            message,
        ),
        Outcome::Success(spoiler) => vec![
            Step::new(
                "send spoiler message",
                Action::Channel(CreateMessage::embed(embeds::spoiler(message, spoiler, config))),
            ),
            Step::new("delete original message", Action::DeleteOriginal),
        ],
    }
}

/// Overlength notices DM the notice, echo the author's original text back
/// so nothing is lost when the message is deleted, then delete. The echo
/// only makes sense if the notice arrived, hence the chain.
fn overlength_plan(label: &'static str, notice: Embed, message: &InboundMessage) -> Vec<Step> {
    vec![
        Step::new(label, Action::Direct(CreateMessage::embed(notice))),
        Step::chained(
            "echo original message",
            Action::Direct(CreateMessage::text(&message.content)),
        ),
        Step::new("delete original message", Action::DeleteOriginal),
    ]
}

/// Run the steps in order. Failures are consumed at the step boundary: each
/// one is logged and the walk continues, except that steps marked
/// `needs_prior` are skipped when the step before them failed. There are no
/// retries.
pub async fn run(steps: Vec<Step>, message: &InboundMessage, messenger: &dyn Messenger) {
    let mut prior_ok = true;

    for step in steps {
        if step.needs_prior && !prior_ok {
            debug!("Skipping `{}`: previous step failed", step.label);
            continue;
        }

        let result = match step.action {
            Action::Direct(msg) => messenger.send_direct(&message.author_id, msg).await,
            Action::Channel(msg) => messenger.send_channel(&message.channel_id, msg).await,
            Action::DeleteOriginal => {
                messenger
                    .delete_original(&message.channel_id, &message.message_id)
                    .await
            }
        };

        match result {
            Ok(()) => prior_ok = true,
            Err(e) => {
                error!("Failed to {}: {}", step.label, e);
                prior_ok = false;
            }
        }
    }
}
