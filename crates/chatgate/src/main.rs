//! Chatgate CLI binary.
//!
//! Runs single chat messages through the full admission pipeline and prints
//! the effective configuration.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use chatgate::observability::{ObservabilityConfig, init_observability_with_config};
    use cli::{Cli, Commands, load_config, run_chat, show_config};

    // Secrets may come from a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_observability_with_config(
        ObservabilityConfig::new("chatgate")
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Chat { message, token } => {
            run_chat(&config, &message, token).await?;
        }

        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}
