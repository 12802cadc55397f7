// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error types for configuration loading and validation.
//!
//! Converts Figment deserialization errors into miette diagnostics so
//! startup failures render as readable, actionable messages instead of
//! a raw serde error chain.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic rendering via miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML could not be parsed or deserialized into the config model.
    #[error("configuration could not be loaded: {message}")]
    #[diagnostic(
        code(voxtask::config::parse),
        help("check voxtask.toml against the documented sections: agent, telegram, speech, storage")
    )]
    Parse {
        /// Figment's description of the failure, including the offending key.
        message: String,
    },

    /// A value deserialized fine but fails a semantic constraint.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(voxtask::config::validation))]
    Validation {
        /// Description of the violated constraint.
        message: String,
    },
}

/// Convert a Figment error into one diagnostic per underlying failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render all collected errors to stderr as miette reports.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(format!("{error}"));
        eprintln!("{report:?}");
        if let Some(help) = error.help() {
            eprintln!("  help: {help}");
        }
    }
}
