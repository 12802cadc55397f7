// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./voxtask.toml` > `~/.config/voxtask/voxtask.toml`
//! > `/etc/voxtask/voxtask.toml` with environment variable overrides via
//! the `VOXTASK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VoxtaskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/voxtask/voxtask.toml` (system-wide)
/// 3. `~/.config/voxtask/voxtask.toml` (user XDG config)
/// 4. `./voxtask.toml` (local directory)
/// 5. `VOXTASK_*` environment variables
pub fn load_config() -> Result<VoxtaskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoxtaskConfig::default()))
        .merge(Toml::file("/etc/voxtask/voxtask.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("voxtask/voxtask.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("voxtask.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<VoxtaskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoxtaskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VoxtaskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoxtaskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `VOXTASK_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("VOXTASK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: VOXTASK_SPEECH_API_KEY -> "speech_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("speech_", "speech.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
