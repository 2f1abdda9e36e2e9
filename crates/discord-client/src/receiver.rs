//! Message receiver with polling.

use crate::client::DiscordClient;
use crate::error::DiscordError;
use crate::types::{ChannelKind, InboundMessage};
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error, warn};

const POLL_LIMIT: u8 = 100;
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Polling state for one watched channel.
struct WatchedChannel {
    id: String,
    kind: ChannelKind,
    /// Newest message id seen so far. `None` until the baseline poll has
    /// established where new traffic starts.
    cursor: Option<String>,
}

/// Message receiver that polls the watched channels for new messages.
pub struct MessageReceiver {
    client: DiscordClient,
    channel_ids: Vec<String>,
    poll_interval: Duration,
}

impl MessageReceiver {
    /// Create a new message receiver.
    pub fn new(client: DiscordClient, channel_ids: Vec<String>, poll_interval: Duration) -> Self {
        Self {
            client,
            channel_ids,
            poll_interval,
        }
    }

    /// Start receiving messages as an async stream.
    ///
    /// Each watched channel is looked up once to learn its kind; channels
    /// that cannot be resolved are skipped with a warning. The cursor starts
    /// at the channel's newest existing message so history is not replayed
    /// after a restart.
    pub fn stream(self) -> impl Stream<Item = InboundMessage> {
        async_stream::stream! {
            let mut channels = Vec::new();
            for id in &self.channel_ids {
                match self.client.get_channel(id).await {
                    Ok(channel) => channels.push(WatchedChannel {
                        id: channel.id,
                        kind: channel.kind,
                        cursor: None,
                    }),
                    Err(e) => warn!("Skipping channel {}: {}", id, e),
                }
            }

            loop {
                for channel in &mut channels {
                    match self.poll(channel).await {
                        Ok(messages) => {
                            for msg in messages {
                                debug!("Received message {} from {} in {}",
                                    msg.message_id,
                                    msg.author_name,
                                    msg.channel_id
                                );
                                yield msg;
                            }
                        }
                        Err(e) => {
                            error!("Receive error on {}: {}", channel.id, e);
                            // Back off on error
                            sleep(ERROR_BACKOFF).await;
                        }
                    }
                }

                sleep(self.poll_interval).await;
            }
        }
    }

    async fn poll(
        &self,
        channel: &mut WatchedChannel,
    ) -> Result<Vec<InboundMessage>, DiscordError> {
        let Some(cursor) = channel.cursor.clone() else {
            // Baseline poll: record the newest message and report nothing.
            let newest = self.client.channel_messages(&channel.id, None, 1).await?;
            let baseline = newest
                .last()
                .map(|m| m.id.clone())
                .unwrap_or_else(|| "0".to_string());
            channel.cursor = Some(baseline);
            return Ok(Vec::new());
        };

        let messages = self
            .client
            .channel_messages(&channel.id, Some(&cursor), POLL_LIMIT)
            .await?;

        if let Some(newest) = messages.last() {
            channel.cursor = Some(newest.id.clone());
        }

        Ok(messages
            .iter()
            .map(|m| InboundMessage::from_message(m, channel.kind))
            .collect())
    }
}
