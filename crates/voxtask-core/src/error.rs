// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Voxtask bot.

use thiserror::Error;

/// The primary error type used across all Voxtask adapter traits and core operations.
#[derive(Debug, Error)]
pub enum VoxtaskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential store errors (file read/write, malformed JSON on disk).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel adapter errors (connection failure, message format, file download).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Speech service transport errors (upload, submit, or poll request failure).
    #[error("speech service error: {message}")]
    Speech {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The speech service reported a terminal failure for a transcription job.
    #[error("transcription failed: {}", message.as_deref().unwrap_or("speech service reported an error"))]
    TranscriptionFailed { message: Option<String> },

    /// Operation timed out (e.g. transcription poll attempts exhausted).
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Task backend transport errors (request failure, malformed response).
    #[error("task backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
