use std::env;

/// Throttling of report submissions, keyed by source address. The 6th
/// request inside one window is rejected with 429 under the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Length of the submission window in seconds.
    pub window_seconds: u64,
    /// Submissions admitted per source address inside one window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_seconds: 15 * 60,
            max_requests: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.enabled = parse_bool_env("RATE_LIMIT_ENABLED", cfg.enabled);

        if let Ok(raw) = env::var("RATE_LIMIT_WINDOW_SECONDS") {
            match parse_positive(&raw) {
                Some(seconds) => cfg.window_seconds = seconds,
                None => {
                    tracing::warn!("Invalid RATE_LIMIT_WINDOW_SECONDS '{}', keeping {}", raw, cfg.window_seconds);
                }
            }
        }

        if let Ok(raw) = env::var("RATE_LIMIT_MAX") {
            match parse_positive(&raw).and_then(|v| u32::try_from(v).ok()) {
                Some(max) => cfg.max_requests = max,
                None => {
                    tracing::warn!("Invalid RATE_LIMIT_MAX '{}', keeping {}", raw, cfg.max_requests);
                }
            }
        }

        cfg
    }
}

fn parse_bool_env(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "no" | "n" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse().ok().filter(|value| *value > 0)
}
