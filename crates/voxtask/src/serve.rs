// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `voxtask serve` command implementation.
//!
//! Starts the bot: opens the per-chat credential store, wires the
//! AssemblyAI transcriber and Bitrix24 backend into the dialog engine,
//! connects the Telegram channel, and enters the agent loop. Supports
//! graceful shutdown via signal handlers.

use std::sync::Arc;

use tracing::{error, info};

use voxtask_agent::engine::DialogEngine;
use voxtask_agent::{AgentLoop, shutdown};
use voxtask_bitrix::BitrixClient;
use voxtask_config::model::VoxtaskConfig;
use voxtask_core::VoxtaskError;
use voxtask_core::traits::ChannelAdapter;
use voxtask_credentials::CredentialStore;
use voxtask_telegram::TelegramChannel;
use voxtask_transcribe::AssemblyAiClient;

/// Runs the `voxtask serve` command.
pub async fn run_serve(config: VoxtaskConfig) -> Result<(), VoxtaskError> {
    // Initialize tracing subscriber.
    init_tracing(&config.agent.log_level);

    info!("starting voxtask serve");

    // Open the durable per-chat credential store.
    let credentials = Arc::new(CredentialStore::open(&config.storage.data_dir).await?);
    info!(data_dir = config.storage.data_dir.as_str(), "credential store opened");

    // Initialize the speech transcriber.
    let transcriber = AssemblyAiClient::new(config.speech.clone()).map_err(|e| {
        error!(error = %e, "failed to initialize transcriber");
        eprintln!("error: AssemblyAI API key required. Set via: config or VOXTASK_SPEECH_API_KEY env var");
        e
    })?;

    // Initialize the task backend.
    let backend = BitrixClient::new(credentials.clone())?;

    let engine = Arc::new(DialogEngine::new(
        credentials,
        Arc::new(transcriber),
        Arc::new(backend),
    ));

    // Initialize and connect the Telegram channel.
    let mut telegram = TelegramChannel::new(&config.telegram).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram channel");
        eprintln!("error: Telegram bot token required. Set via: config or VOXTASK_TELEGRAM_BOT_TOKEN env var");
        e
    })?;
    telegram.connect().await?;
    info!("telegram channel connected");

    // Install signal handler.
    let cancel = shutdown::install_signal_handler();

    // Create and run the agent loop.
    let channel: Arc<dyn ChannelAdapter> = Arc::new(telegram);
    let mut agent_loop = AgentLoop::new(channel, engine);
    agent_loop.run(cancel).await?;

    info!("voxtask serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("voxtask={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
