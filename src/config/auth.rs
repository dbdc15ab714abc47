use std::env;

/// Moderator credential configuration, loaded once at process start.
#[derive(Debug, Clone)]
pub struct ModeratorAuthConfig {
    /// Precomputed bcrypt hashes accepted for moderator sign-in. Empty
    /// means sign-in always fails.
    pub password_hashes: Vec<String>,
    /// Cost factor used when generating new hashes.
    pub bcrypt_cost: u32,
}

impl Default for ModeratorAuthConfig {
    fn default() -> Self {
        Self {
            password_hashes: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ModeratorAuthConfig {
    pub fn from_env() -> Self {
        let password_hashes = env::var("MOD_PASSWORD_HASHES")
            .map(|raw| parse_hash_list(&raw))
            .unwrap_or_default();

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => match raw.trim().parse() {
                Ok(cost) => cost,
                Err(_) => {
                    tracing::warn!(
                        "Invalid BCRYPT_COST '{}', using default cost {}",
                        raw,
                        bcrypt::DEFAULT_COST
                    );
                    bcrypt::DEFAULT_COST
                }
            },
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Self {
            password_hashes,
            bcrypt_cost,
        }
    }
}

fn parse_hash_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
