// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and positive poll intervals.

use crate::diagnostic::ConfigError;
use crate::model::VoxtaskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VoxtaskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.data_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.data_dir must not be empty".to_string(),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    if let Some(key) = &config.speech.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "speech.api_key must not be empty when set".to_string(),
        });
    }

    if config.speech.language_code.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "speech.language_code must not be empty".to_string(),
        });
    }

    if config.speech.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "speech.poll_interval_secs must be positive".to_string(),
        });
    }

    if config.speech.max_poll_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "speech.max_poll_attempts must be positive".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
