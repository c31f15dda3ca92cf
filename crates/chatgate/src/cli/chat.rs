//! Chat and config command handlers.

use chatgate::{ChatgateConfig, HttpModelDriver, Orchestrator};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

const TOKEN_ENV: &str = "CHATGATE_TOKEN";

/// Load configuration from an explicit file or the standard locations.
pub fn load_config(path: Option<&Path>) -> Result<ChatgateConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ChatgateConfig::from_file(path)?,
        None => ChatgateConfig::load()?,
    };
    Ok(config)
}

/// Run one message through the orchestrator and print the outcome.
#[instrument(skip_all)]
pub async fn run_chat(
    config: &ChatgateConfig,
    message: &str,
    token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let driver = HttpModelDriver::from_config(config.model())?;
    let orchestrator = Orchestrator::from_config(config, Arc::new(driver))?;

    let token = token.or_else(|| std::env::var(TOKEN_ENV).ok());
    if token.is_none() {
        debug!(env = TOKEN_ENV, "No token supplied, request will be rejected");
    }
    let credential = token.map(|t| format!("Bearer {t}"));

    let outcome = orchestrator.submit(credential.as_deref(), message).await;
    let status = outcome.status();

    println!("{}", serde_json::to_string_pretty(&outcome.body())?);
    if let Some(secs) = outcome.retry_after_secs() {
        eprintln!("Retry-After: {secs}");
    }

    if outcome.is_success() {
        Ok(())
    } else {
        Err(format!("request failed with status {} ({})", status.code(), status).into())
    }
}

/// Print the effective configuration.
pub fn show_config(config: &ChatgateConfig) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", config.to_toml()?);
    Ok(())
}
