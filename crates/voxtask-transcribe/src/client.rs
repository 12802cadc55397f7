// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the AssemblyAI v2 transcription API.
//!
//! Provides [`AssemblyAiClient`] which owns the upload -> submit -> poll
//! protocol: raw audio is uploaded, a job is submitted with the configured
//! language hint, and status is polled on a fixed interval until the job
//! reaches a terminal state or the attempt budget runs out.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use voxtask_config::model::SpeechConfig;
use voxtask_core::error::VoxtaskError;
use voxtask_core::traits::{PluginAdapter, SpeechTranscriber};
use voxtask_core::types::{AdapterType, HealthStatus};

use crate::types::{TranscriptRequest, TranscriptResponse, TranscriptStatus, UploadResponse};

/// Base URL for the AssemblyAI API.
const API_BASE_URL: &str = "https://api.assemblyai.com";

/// HTTP client for AssemblyAI communication implementing [`SpeechTranscriber`].
///
/// Polling is bounded: after `max_poll_attempts` polls at `poll_interval`
/// the job is abandoned with [`VoxtaskError::Timeout`]. The job keeps
/// running remotely; we simply stop waiting for it.
#[derive(Debug, Clone)]
pub struct AssemblyAiClient {
    client: reqwest::Client,
    language_code: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
    base_url: String,
}

impl AssemblyAiClient {
    /// Creates a new AssemblyAI client.
    ///
    /// Requires `config.api_key` to be set.
    pub fn new(config: SpeechConfig) -> Result<Self, VoxtaskError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            VoxtaskError::Config("speech.api_key is required for transcription".into())
        })?;

        if api_key.is_empty() {
            return Err(VoxtaskError::Config("speech.api_key cannot be empty".into()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(api_key).map_err(|e| {
                VoxtaskError::Config(format!("invalid API key header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| VoxtaskError::Speech {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            language_code: config.language_code,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            max_poll_attempts: config.max_poll_attempts,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Uploads raw audio bytes and returns the opaque upload reference.
    async fn upload(&self, audio: &[u8]) -> Result<String, VoxtaskError> {
        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .header("content-type", "application/octet-stream")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| VoxtaskError::Speech {
                message: format!("audio upload failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let response = check_status("upload", response).await?;
        let body: UploadResponse = response.json().await.map_err(|e| VoxtaskError::Speech {
            message: format!("failed to parse upload response: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(upload_url = %body.upload_url, "audio uploaded");
        Ok(body.upload_url)
    }

    /// Submits a transcription job for an uploaded audio reference.
    async fn submit(&self, audio_url: String) -> Result<TranscriptResponse, VoxtaskError> {
        let request = TranscriptRequest {
            audio_url,
            language_code: self.language_code.clone(),
        };

        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| VoxtaskError::Speech {
                message: format!("job submission failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let response = check_status("submit", response).await?;
        let job: TranscriptResponse = response.json().await.map_err(|e| VoxtaskError::Speech {
            message: format!("failed to parse submission response: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(job_id = %job.id, status = ?job.status, "transcription job submitted");
        Ok(job)
    }

    /// Fetches the current state of a transcription job.
    async fn poll(&self, job_id: &str) -> Result<TranscriptResponse, VoxtaskError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{job_id}", self.base_url))
            .send()
            .await
            .map_err(|e| VoxtaskError::Speech {
                message: format!("status poll failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let response = check_status("poll", response).await?;
        response.json().await.map_err(|e| VoxtaskError::Speech {
            message: format!("failed to parse poll response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Maps a terminal job state to the transcription result.
    fn resolve(job: TranscriptResponse) -> Result<String, VoxtaskError> {
        match job.status {
            TranscriptStatus::Completed => Ok(job.text.unwrap_or_default()),
            TranscriptStatus::Error => {
                warn!(job_id = %job.id, error = ?job.error, "transcription job failed");
                Err(VoxtaskError::TranscriptionFailed { message: job.error })
            }
            // Callers only hand terminal jobs to resolve().
            other => Err(VoxtaskError::Internal(format!(
                "resolve called on non-terminal status {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl SpeechTranscriber for AssemblyAiClient {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, VoxtaskError> {
        let upload_url = self.upload(audio).await?;
        let job = self.submit(upload_url).await?;

        if job.status.is_terminal() {
            return Self::resolve(job);
        }

        let job_id = job.id;
        for attempt in 1..=self.max_poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let job = self.poll(&job_id).await?;
            debug!(job_id = %job_id, attempt, status = ?job.status, "polled transcription job");

            if job.status.is_terminal() {
                return Self::resolve(job);
            }
        }

        let waited = self.poll_interval * self.max_poll_attempts;
        warn!(job_id = %job_id, attempts = self.max_poll_attempts, "transcription poll budget exhausted");
        Err(VoxtaskError::Timeout { duration: waited })
    }
}

#[async_trait]
impl PluginAdapter for AssemblyAiClient {
    fn name(&self) -> &str {
        "assemblyai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transcriber
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxtaskError> {
        // Any HTTP response means the service is reachable; only a transport
        // failure marks the adapter unhealthy.
        match self.client.get(&self.base_url).send().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "speech service unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), VoxtaskError> {
        Ok(())
    }
}

/// Converts a non-success HTTP status into a speech transport error.
async fn check_status(
    op: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, VoxtaskError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(VoxtaskError::Speech {
        message: format!("{op} returned {status}: {body}"),
        source: None,
    })
}
