//! CLI command handlers.

mod chat;
mod commands;

pub use chat::{load_config, run_chat, show_config};
pub use commands::{Cli, Commands};
