//! Discord HTTP client.

use crate::error::DiscordError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Discord REST API v10 client.
///
/// The bot token is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl DiscordClient {
    /// Create a new Discord client.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, DiscordError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: SecretString::new(token.into()),
        })
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token.expose_secret())
    }

    /// The account the token authenticates as. Also serves as the startup
    /// credential check.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, DiscordError> {
        let response = self
            .client
            .get(format!("{}/users/@me", self.base_url))
            .header("Authorization", self.auth())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Check if the Discord API accepts our credentials.
    pub async fn health_check(&self) -> bool {
        self.current_user().await.is_ok()
    }

    /// Look up a channel.
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel, DiscordError> {
        let response = self
            .client
            .get(format!("{}/channels/{}", self.base_url, channel_id))
            .header("Authorization", self.auth())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Messages in a channel, oldest first. `after` is an exclusive message
    /// id cursor; the API itself returns newest first.
    #[instrument(skip(self))]
    pub async fn channel_messages(
        &self,
        channel_id: &str,
        after: Option<&str>,
        limit: u8,
    ) -> Result<Vec<Message>, DiscordError> {
        let mut request = self
            .client
            .get(format!(
                "{}/channels/{}/messages",
                self.base_url, channel_id
            ))
            .header("Authorization", self.auth())
            .query(&[("limit", limit.to_string())]);

        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        let response = request.send().await?;
        let mut messages: Vec<Message> = self.handle_response(response).await?;
        messages.reverse();

        debug!("Fetched {} messages from {}", messages.len(), channel_id);
        Ok(messages)
    }

    /// Post a message to a channel.
    #[instrument(skip(self, message))]
    pub async fn create_message(
        &self,
        channel_id: &str,
        message: &CreateMessage,
    ) -> Result<Message, DiscordError> {
        let response = self
            .client
            .post(format!(
                "{}/channels/{}/messages",
                self.base_url, channel_id
            ))
            .header("Authorization", self.auth())
            .json(message)
            .send()
            .await?;

        let created: Message = self.handle_response(response).await?;
        debug!("Posted message {} to {}", created.id, channel_id);
        Ok(created)
    }

    /// Delete a message from a channel.
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<(), DiscordError> {
        let response = self
            .client
            .delete(format!(
                "{}/channels/{}/messages/{}",
                self.base_url, channel_id, message_id
            ))
            .header("Authorization", self.auth())
            .send()
            .await?;

        // Success is 204 with an empty body.
        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        debug!("Deleted message {} from {}", message_id, channel_id);
        Ok(())
    }

    /// Open (or reuse) the DM channel with a user.
    #[instrument(skip(self))]
    pub async fn create_dm(&self, recipient_id: &str) -> Result<Channel, DiscordError> {
        let request = CreateDmRequest {
            recipient_id: recipient_id.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/users/@me/channels", self.base_url))
            .header("Authorization", self.auth())
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, DiscordError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(DiscordError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract error information from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> DiscordError {
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication failed");
                DiscordError::Unauthorized
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                DiscordError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
