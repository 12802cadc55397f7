// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voxtask - a Telegram bot that turns voice notes into Bitrix24 tasks.
//!
//! This is the binary entry point for the Voxtask bot.

mod serve;

use clap::{Parser, Subcommand};

/// Voxtask - a Telegram bot that turns voice notes into Bitrix24 tasks.
#[derive(Parser, Debug)]
#[command(name = "voxtask", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Voxtask bot server.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match voxtask_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            voxtask_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("voxtask serve failed: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("voxtask: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config =
            voxtask_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "voxtask");
    }
}
