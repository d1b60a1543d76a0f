//! Hash password command implementation.

use anyhow::Result;
use scanner_config::{AccessGate, AppConfig};

pub async fn run(salt: Option<String>, config: AppConfig) -> Result<()> {
    let salt = salt.unwrap_or(config.auth.salt);
    let password = super::read_password(&config.auth.password_env)?;
    if password.is_empty() {
        anyhow::bail!("Refusing to hash an empty password");
    }

    let hash = AccessGate::hash_password(&salt, &password);

    println!("[auth]");
    println!("enabled = true");
    println!("salt = {:?}", salt);
    println!("password_hash = {:?}", hash);

    Ok(())
}
