//! Chat channel that release announcements are posted to.
use async_trait::async_trait;
use serde::Serialize;

#[cfg(test)]
use mockall::automock;

use crate::Result;

/// Slack incoming webhook client.
pub mod slack;

/// Message posted to the channel, already in chat markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &ChatMessage) -> Result<()>;
}
