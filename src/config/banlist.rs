use std::env;

/// Ban-list synchronization settings. Sync only runs when `enabled` is set
/// and a store token is present; otherwise approvals are logged and skipped.
#[derive(Debug, Clone)]
pub struct BanListConfig {
    pub enabled: bool,
    /// Repository holding the ban-list document, as "owner/name".
    pub repo: String,
    /// Path of the document inside the repository.
    pub path: String,
    /// Token for the external store. Absent means sync stays off.
    pub token: Option<String>,
}

impl Default for BanListConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            repo: String::new(),
            path: "bans.json".to_string(),
            token: None,
        }
    }
}

impl BanListConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enabled: parse_bool_env("BANLIST_SYNC_ENABLED", defaults.enabled),
            repo: env::var("BANLIST_REPO").unwrap_or(defaults.repo),
            path: env::var("BANLIST_PATH")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.path),
            token: env::var("GITHUB_TOKEN")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        }
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
