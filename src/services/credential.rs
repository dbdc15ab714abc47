use crate::config::auth::ModeratorAuthConfig;

/// Checks a submitted secret against the configured set of precomputed
/// bcrypt hashes. The set is loaded once at startup and held immutably.
#[derive(Clone)]
pub struct CredentialValidator {
    hashes: Vec<String>,
}

impl CredentialValidator {
    pub fn new(config: ModeratorAuthConfig) -> Self {
        Self {
            hashes: config.password_hashes,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ModeratorAuthConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        !self.hashes.is_empty()
    }

    pub fn hash_count(&self) -> usize {
        self.hashes.len()
    }

    /// True if `candidate` matches at least one configured hash.
    ///
    /// Fails closed: with no hashes configured this returns false without
    /// attempting a comparison. Otherwise hashes are tried in configuration
    /// order and the first match wins; order only affects latency.
    pub fn validate(&self, candidate: &str) -> bool {
        if self.hashes.is_empty() {
            return false;
        }

        self.hashes
            .iter()
            .any(|hash| match bcrypt::verify(candidate, hash) {
                Ok(matched) => matched,
                Err(e) => {
                    tracing::warn!("Unparseable credential hash in configuration: {e}");
                    false
                }
            })
    }
}
