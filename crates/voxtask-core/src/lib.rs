// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Voxtask voice-to-task bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Voxtask workspace. The channel,
//! transcriber, and task backend adapters all implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VoxtaskError;
pub use types::{
    AdapterType, CallbackAction, ChannelCapabilities, ChatId, CreateTaskOutcome, HealthStatus,
    InboundEvent, InboundKind, ListTasksOutcome, MessageId, NewTask, OutboundMessage, PlanPeriod,
    ReplyMarkup, TaskSummary,
};

// Re-export all adapter traits at crate root.
pub use traits::{ChannelAdapter, PluginAdapter, SpeechTranscriber, TaskBackend};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxtask_error_has_all_variants() {
        let _config = VoxtaskError::Config("test".into());
        let _storage = VoxtaskError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = VoxtaskError::Channel {
            message: "test".into(),
            source: None,
        };
        let _speech = VoxtaskError::Speech {
            message: "test".into(),
            source: None,
        };
        let _failed = VoxtaskError::TranscriptionFailed { message: None };
        let _timeout = VoxtaskError::Timeout {
            duration: std::time::Duration::from_secs(300),
        };
        let _backend = VoxtaskError::Backend {
            message: "test".into(),
            source: None,
        };
        let _internal = VoxtaskError::Internal("test".into());
    }

    #[test]
    fn transcription_failed_display_includes_detail() {
        let err = VoxtaskError::TranscriptionFailed {
            message: Some("audio too short".into()),
        };
        assert_eq!(err.to_string(), "transcription failed: audio too short");

        let bare = VoxtaskError::TranscriptionFailed { message: None };
        assert!(bare.to_string().starts_with("transcription failed"));
    }
}
