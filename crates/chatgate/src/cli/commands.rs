//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chatgate - authenticated, rate-limited access to a chat model
#[derive(Parser, Debug)]
#[command(name = "chatgate")]
#[command(about = "Authenticated, rate-limited access to a chat model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one chat message through the gateway
    Chat {
        /// Message text
        #[arg(long)]
        message: String,

        /// Bearer token (defaults to $CHATGATE_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}
