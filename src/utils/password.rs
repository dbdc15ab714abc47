use anyhow::{Context, Result};

/// Hash a moderator credential with an explicit bcrypt cost factor.
pub fn hash_credential(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).context("Failed to hash credential")
}
