// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the AssemblyAI v2 transcription API.

use serde::{Deserialize, Serialize};

/// Response to a raw audio upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Opaque reference to the uploaded audio, used to submit a job.
    pub upload_url: String,
}

/// Body for submitting a transcription job.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptRequest {
    /// Upload reference returned by the upload endpoint.
    pub audio_url: String,
    /// Spoken-language hint, fixed per deployment (e.g. "ru").
    pub language_code: String,
}

/// Transcription job state as reported by the service.
///
/// The service reports `error` for failed jobs; any unrecognized status
/// maps to [`TranscriptStatus::Other`] and is treated as still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
    #[serde(other)]
    Other,
}

impl TranscriptStatus {
    /// True once polling should stop.
    pub const fn is_terminal(self) -> bool {
        matches!(self, TranscriptStatus::Completed | TranscriptStatus::Error)
    }
}

/// A transcription job as returned by submission and status polling.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptResponse {
    /// Job id assigned by the service.
    pub id: String,
    /// Current job status.
    pub status: TranscriptStatus,
    /// Transcribed text, populated only on `completed`.
    #[serde(default)]
    pub text: Option<String>,
    /// Failure detail, populated on `error`.
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_deserializes_from_wire_strings() {
        let parse = |s: &str| -> TranscriptStatus {
            serde_json::from_str(&format!("\"{s}\"")).unwrap()
        };
        assert_eq!(parse("queued"), TranscriptStatus::Queued);
        assert_eq!(parse("processing"), TranscriptStatus::Processing);
        assert_eq!(parse("completed"), TranscriptStatus::Completed);
        assert_eq!(parse("error"), TranscriptStatus::Error);
        assert_eq!(parse("something_new"), TranscriptStatus::Other);
    }

    #[test]
    fn only_completed_and_error_are_terminal() {
        assert!(TranscriptStatus::Completed.is_terminal());
        assert!(TranscriptStatus::Error.is_terminal());
        assert!(!TranscriptStatus::Queued.is_terminal());
        assert!(!TranscriptStatus::Processing.is_terminal());
        assert!(!TranscriptStatus::Other.is_terminal());
    }

    #[test]
    fn response_parses_without_text_or_error() {
        let json = r#"{"id": "t1", "status": "queued"}"#;
        let resp: TranscriptResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.id, "t1");
        assert!(resp.text.is_none());
        assert!(resp.error.is_none());
    }
}
