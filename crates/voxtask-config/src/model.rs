// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Voxtask bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Voxtask configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoxtaskConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Speech-to-text service settings.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Credential storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "voxtask".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required to run the bot.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Speech-to-text service configuration (AssemblyAI).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// AssemblyAI API key. Required to run the bot.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Spoken-language hint passed with every transcription job.
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Seconds between transcription job status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum number of status polls before the job is treated as timed out.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language_code: default_language_code(),
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

fn default_language_code() -> String {
    "ru".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_max_poll_attempts() -> u32 {
    60 // five minutes at the default interval
}

/// Credential storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding `webhooks.json` and `user_ids.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("voxtask"))
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .to_string_lossy()
        .into_owned()
}
