use std::env;

/// Chat-webhook endpoints, one per notification channel. An unset or empty
/// URL disables that channel.
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    /// Receives new-submission events.
    pub report_url: Option<String>,
    /// Receives action-decision events.
    pub action_url: Option<String>,
}

impl WebhookConfig {
    pub fn from_env() -> Self {
        Self {
            report_url: non_empty_env("REPORT_WEBHOOK_URL"),
            action_url: non_empty_env("ACTION_WEBHOOK_URL"),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
