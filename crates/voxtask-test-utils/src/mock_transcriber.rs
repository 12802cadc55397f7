// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock speech transcriber with scripted results.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use voxtask_core::VoxtaskError;
use voxtask_core::traits::SpeechTranscriber;

/// One scripted transcription result.
pub enum ScriptedTranscript {
    /// The job completes with this text.
    Text(String),
    /// The job reaches the failed terminal status.
    Failed,
    /// The poll budget runs out.
    TimedOut,
}

/// A mock transcriber returning scripted results in order.
///
/// Results queued via [`push_text`]/[`push_failure`]/[`push_timeout`] are
/// consumed one per `transcribe` call; an exhausted script fails the call
/// so tests notice unexpected extra invocations. Received audio payloads
/// are captured for assertion.
///
/// [`push_text`]: MockTranscriber::push_text
/// [`push_failure`]: MockTranscriber::push_failure
/// [`push_timeout`]: MockTranscriber::push_timeout
pub struct MockTranscriber {
    script: Arc<Mutex<VecDeque<ScriptedTranscript>>>,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockTranscriber {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful transcription.
    pub async fn push_text(&self, text: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(ScriptedTranscript::Text(text.into()));
    }

    /// Queue a terminal-failure result.
    pub async fn push_failure(&self) {
        self.script.lock().await.push_back(ScriptedTranscript::Failed);
    }

    /// Queue a poll-timeout result.
    pub async fn push_timeout(&self) {
        self.script
            .lock()
            .await
            .push_back(ScriptedTranscript::TimedOut);
    }

    /// Audio payloads received so far, in call order.
    pub async fn received_audio(&self) -> Vec<Vec<u8>> {
        self.received.lock().await.clone()
    }

    /// Number of `transcribe` calls observed.
    pub async fn call_count(&self) -> usize {
        self.received.lock().await.len()
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechTranscriber for MockTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, VoxtaskError> {
        self.received.lock().await.push(audio.to_vec());

        let scripted = self.script.lock().await.pop_front().ok_or_else(|| {
            VoxtaskError::Internal("MockTranscriber script exhausted".into())
        })?;

        match scripted {
            ScriptedTranscript::Text(text) => Ok(text),
            ScriptedTranscript::Failed => Err(VoxtaskError::TranscriptionFailed { message: None }),
            ScriptedTranscript::TimedOut => Err(VoxtaskError::Timeout {
                duration: std::time::Duration::from_secs(300),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_results_are_consumed_in_order() {
        let mock = MockTranscriber::new();
        mock.push_text("first").await;
        mock.push_failure().await;

        assert_eq!(mock.transcribe(b"a").await.unwrap(), "first");
        assert!(matches!(
            mock.transcribe(b"b").await,
            Err(VoxtaskError::TranscriptionFailed { .. })
        ));
        assert_eq!(mock.call_count().await, 2);
        assert_eq!(mock.received_audio().await, vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[tokio::test]
    async fn exhausted_script_is_an_error() {
        let mock = MockTranscriber::new();
        assert!(mock.transcribe(b"x").await.is_err());
    }
}
