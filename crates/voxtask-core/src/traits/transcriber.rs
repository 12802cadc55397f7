// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech-to-text trait for transcription service integrations.

use async_trait::async_trait;

use crate::error::VoxtaskError;

/// Turns a raw audio payload into text via an external speech service.
///
/// Implementations own the full upload / submit / poll protocol. A
/// terminal `failed` job status surfaces as
/// [`VoxtaskError::TranscriptionFailed`]; poll-attempt exhaustion as
/// [`VoxtaskError::Timeout`]. The caller decides how to render either
/// to the user.
///
/// [`VoxtaskError::TranscriptionFailed`]: crate::error::VoxtaskError::TranscriptionFailed
/// [`VoxtaskError::Timeout`]: crate::error::VoxtaskError::Timeout
#[async_trait]
pub trait SpeechTranscriber: Send + Sync + 'static {
    /// Transcribes the given audio bytes, waiting for the job to resolve.
    async fn transcribe(&self, audio: &[u8]) -> Result<String, VoxtaskError>;
}
