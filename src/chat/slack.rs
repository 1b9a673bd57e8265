//! Implements the Notifier trait for Slack incoming webhooks
use async_trait::async_trait;
use log::*;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    Result,
    chat::{ChatMessage, Notifier},
    config::publish::SlackConfig,
    error::DevflowError,
};

pub struct SlackNotifier {
    client: Client,
    endpoint: SecretString,
}

impl SlackNotifier {
    pub fn new(config: &SlackConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    fn endpoint_url(&self) -> Result<Url> {
        let endpoint = self.endpoint.expose_secret();

        if endpoint.is_empty() {
            return Err(DevflowError::invalid_config(
                "slack.endpoint is not configured",
            ));
        }

        Ok(Url::parse(endpoint)?)
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    /// Post the message as JSON. Anything but `200 OK` counts as rejected.
    async fn send(&self, message: &ChatMessage) -> Result<()> {
        let endpoint = self.endpoint_url()?;

        debug!("posting {} bytes to chat", message.text.len());

        let response = self
            .client
            .post(endpoint)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DevflowError::NotificationRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
