//! Generate a bcrypt hash for the moderator credential list.
//!
//! Usage: `hashgen <password> [cost]`. Without an explicit cost the value
//! comes from `BCRYPT_COST` (or the bcrypt default). Paste the output into
//! `MOD_PASSWORD_HASHES`, separating multiple hashes with semicolons.

use modqueue::config::auth::ModeratorAuthConfig;
use modqueue::utils::hash_credential;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let password = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: hashgen <password> [cost]"))?;
    let cost = match args.next() {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("cost must be an integer, got '{}'", raw))?,
        None => ModeratorAuthConfig::from_env().bcrypt_cost,
    };

    let hash = hash_credential(&password, cost)?;
    println!("{hash}");
    Ok(())
}
