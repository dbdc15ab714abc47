use crate::config::webhook::WebhookConfig;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

/// Which chat webhook a message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// New-submission events.
    Reports,
    /// Action-decision events.
    Actions,
}

/// Best-effort delivery of human-readable alerts to the configured chat
/// webhooks. Messages are posted at most once from a detached task; callers
/// never learn whether delivery succeeded.
#[derive(Clone)]
pub struct NotificationService {
    client: Client,
    report_url: Option<String>,
    action_url: Option<String>,
}

impl NotificationService {
    pub fn new(config: WebhookConfig) -> Self {
        let client = match Client::builder().timeout(Duration::from_secs(10)).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build webhook client with timeout: {e}");
                Client::new()
            }
        };

        Self {
            client,
            report_url: config.report_url,
            action_url: config.action_url,
        }
    }

    pub fn from_env() -> Self {
        Self::new(WebhookConfig::from_env())
    }

    /// Returns true if at least one channel has a webhook URL.
    pub fn is_configured(&self) -> bool {
        self.report_url.is_some() || self.action_url.is_some()
    }

    fn url_for(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Reports => self.report_url.as_deref(),
            Channel::Actions => self.action_url.as_deref(),
        }
    }

    /// Queue `text` for delivery to `channel` and return immediately.
    ///
    /// No-op when the channel has no URL. The POST carries the text under a
    /// `content` key. No retry, no acknowledgement; failures are classified
    /// for the log and dropped.
    pub fn dispatch(&self, channel: Channel, text: String) {
        let Some(url) = self.url_for(channel) else {
            tracing::debug!(?channel, "No webhook URL configured, skipping notification");
            return;
        };

        let url = url.to_string();
        let client = self.client.clone();

        tokio::spawn(async move {
            let result = client.post(&url).json(&json!({ "content": text })).send().await;

            match result {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(?channel, "Webhook notification delivered");
                }
                Ok(response) => {
                    tracing::warn!(
                        ?channel,
                        status = %response.status(),
                        "Webhook endpoint rejected notification"
                    );
                }
                Err(e) if e.is_timeout() => {
                    tracing::warn!(?channel, "Webhook delivery timed out: {e}");
                }
                Err(e) if e.is_connect() => {
                    tracing::warn!(?channel, "Webhook endpoint unreachable: {e}");
                }
                Err(e) => {
                    tracing::warn!(?channel, "Webhook delivery failed: {e}");
                }
            }
        });
    }
}
