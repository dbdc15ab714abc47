use anyhow::{Context, Result};
use std::fmt::Write;

/// Generate an opaque report id: 8 bytes of OS randomness rendered as a
/// 16-character lowercase hex string. Ids are not checked for uniqueness
/// against existing reports.
pub fn generate_report_id() -> Result<String> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes).context("Failed to read OS randomness")?;

    let mut id = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // write! into a String cannot fail
        let _ = write!(id, "{:02x}", byte);
    }
    Ok(id)
}
