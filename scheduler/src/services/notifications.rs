//! HTTP notification gateway
//!
//! Delivers messages as JSON POSTs to per-channel webhook endpoints. A
//! channel without a configured endpoint logs the message instead of
//! sending it, which is the development-mode behavior.

use reqwest::Client;
use shared::NotificationChannel;
use tracing::info;

use crate::error::{SchedulerError, SchedulerResult};
use crate::traits::{NotificationGateway, NotificationMessage};

pub struct HttpNotificationGateway {
    client: Client,
    email_endpoint: Option<String>,
    messaging_endpoint: Option<String>,
}

impl HttpNotificationGateway {
    pub fn new(email_endpoint: Option<String>, messaging_endpoint: Option<String>) -> Self {
        Self {
            client: Client::new(),
            email_endpoint,
            messaging_endpoint,
        }
    }

    /// Gateway that only logs, never sends
    pub fn log_only() -> Self {
        Self::new(None, None)
    }

    fn endpoint(&self, channel: NotificationChannel) -> Option<&str> {
        match channel {
            NotificationChannel::Email => self.email_endpoint.as_deref(),
            NotificationChannel::Messaging => self.messaging_endpoint.as_deref(),
        }
    }
}

#[async_trait::async_trait]
impl NotificationGateway for HttpNotificationGateway {
    async fn send(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        message: &NotificationMessage,
    ) -> SchedulerResult<()> {
        let Some(endpoint) = self.endpoint(channel) else {
            info!(
                "📭 {} message would be sent to {}: {}",
                channel, recipient, message.subject
            );
            return Ok(());
        };

        let payload = serde_json::json!({
            "recipient": recipient,
            "subject": message.subject,
            "body": message.body,
        });

        let response = self
            .client
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| SchedulerError::Notification {
                channel: channel.to_string(),
                message: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SchedulerError::Notification {
                channel: channel.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        info!("📬 Sent {} notification to {}", channel, recipient);
        Ok(())
    }
}
