//! Validate configuration command.

use anyhow::{Context, Result};
use kite_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("(file not found, using defaults and environment overrides)");
    }

    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("Configuration is valid!");
    println!();
    println!("{}", rendered);

    for var in [
        &config.kite.api_key_env,
        &config.kite.api_secret_env,
        &config.kite.access_token_env,
    ] {
        let state = match std::env::var(var) {
            Ok(value) if !value.is_empty() => "set",
            _ => "not set",
        };
        println!("{}: {}", var, state);
    }

    Ok(())
}
