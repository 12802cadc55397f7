// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Voxtask pipeline.
//!
//! Each test wires the real dialog engine, credential store, AssemblyAI
//! client, and Bitrix24 client against wiremock servers, with a mock
//! channel standing in for Telegram. Tests are independent and
//! order-insensitive.

use std::sync::Arc;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voxtask_agent::engine::DialogEngine;
use voxtask_agent::AgentLoop;
use voxtask_bitrix::BitrixClient;
use voxtask_config::model::SpeechConfig;
use voxtask_core::{CallbackAction, ChatId, InboundEvent, InboundKind};
use voxtask_credentials::CredentialStore;
use voxtask_test_utils::MockChannel;
use voxtask_transcribe::AssemblyAiClient;

struct Harness {
    channel: Arc<MockChannel>,
    credentials: Arc<CredentialStore>,
    speech_server: MockServer,
    bitrix_server: MockServer,
    cancel: CancellationToken,
    run: tokio::task::JoinHandle<Result<(), voxtask_core::VoxtaskError>>,
    _dir: TempDir,
}

impl Harness {
    /// Builds the full pipeline against two wiremock servers and starts
    /// the agent loop in the background.
    async fn start() -> Self {
        let dir = TempDir::new().unwrap();
        let speech_server = MockServer::start().await;
        let bitrix_server = MockServer::start().await;

        let credentials = Arc::new(CredentialStore::open(dir.path()).await.unwrap());

        let speech_config = SpeechConfig {
            api_key: Some("test-api-key".into()),
            language_code: "ru".into(),
            poll_interval_secs: 1,
            max_poll_attempts: 3,
        };
        let transcriber = AssemblyAiClient::new(speech_config)
            .unwrap()
            .with_base_url(speech_server.uri());
        let backend = BitrixClient::new(credentials.clone()).unwrap();

        let engine = Arc::new(DialogEngine::new(
            credentials.clone(),
            Arc::new(transcriber),
            Arc::new(backend),
        ));

        let channel = Arc::new(MockChannel::new());
        let mut agent = AgentLoop::new(channel.clone(), engine);

        let cancel = CancellationToken::new();
        let run_cancel = cancel.clone();
        let run = tokio::spawn(async move { agent.run(run_cancel).await });

        Self {
            channel,
            credentials,
            speech_server,
            bitrix_server,
            cancel,
            run,
            _dir: dir,
        }
    }

    async fn inject_text(&self, chat: i64, text: &str) {
        self.channel
            .inject_event(InboundEvent {
                chat_id: ChatId(chat),
                kind: InboundKind::Text(text.to_string()),
            })
            .await;
    }

    async fn stop(self) {
        self.cancel.cancel();
        self.run.await.unwrap().unwrap();
    }
}

/// Mounts the three speech-service endpoints for a job that completes
/// on the first poll.
async fn mount_transcription(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "upload_url": "https://cdn.example/audio/1"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-1",
            "status": "completed",
            "text": text
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn voice_to_task_pipeline() {
    let h = Harness::start().await;
    mount_transcription(&h.speech_server, "купить молоко").await;

    Mock::given(method("POST"))
        .and(path("/tasks.task.add"))
        .and(body_json(serde_json::json!({
            "fields": {
                "TITLE": "Groceries",
                "DESCRIPTION": "купить молоко",
                "RESPONSIBLE_ID": "42",
                "DEADLINE": "2025-01-01 10:00:00"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": { "task": { "id": 101 } }
        })))
        .expect(1)
        .mount(&h.bitrix_server)
        .await;

    // Configure credentials through the dialog itself.
    h.inject_text(1, "Установить User ID").await;
    h.inject_text(1, "42").await;
    h.inject_text(1, "Установить Webhook URL").await;
    h.inject_text(1, &h.bitrix_server.uri()).await;

    // Voice note, confirm, title, deadline.
    h.channel
        .inject_event(InboundEvent {
            chat_id: ChatId(1),
            kind: InboundKind::Voice {
                data: vec![0u8; 32],
                duration_secs: Some(3.0),
            },
        })
        .await;
    h.channel
        .inject_event(InboundEvent {
            chat_id: ChatId(1),
            kind: InboundKind::Callback(CallbackAction::ConfirmAndCreateTask),
        })
        .await;
    h.inject_text(1, "Groceries").await;
    h.inject_text(1, "2025-01-01 10:00:00").await;

    let sent = h.channel.wait_for_sent(8).await;
    assert_eq!(sent[4].text, "Транскрипция: купить молоко");
    assert_eq!(
        sent.last().map(|m| m.text.as_str()),
        Some("Задача успешно создана в Битрикс24.")
    );

    h.stop().await;
}

#[tokio::test]
async fn plans_listing_renders_backend_tasks() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks.task.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": {
                "tasks": [
                    { "title": "Отчёт", "deadline": "2025-01-02T10:00:00+03:00" }
                ]
            }
        })))
        .expect(1)
        .mount(&h.bitrix_server)
        .await;

    let webhook = h.bitrix_server.uri();
    h.credentials
        .set_webhook(ChatId(5), &webhook)
        .await
        .unwrap();

    h.inject_text(5, "Планы на неделю").await;

    let sent = h.channel.wait_for_sent(1).await;
    assert_eq!(
        sent[0].text,
        "Планы на неделю:\n- Отчёт (дедлайн: 2025-01-02T10:00:00+03:00)"
    );

    h.stop().await;
}

#[tokio::test]
async fn missing_webhook_is_reported_without_backend_calls() {
    let h = Harness::start().await;
    // No mocks mounted on the Bitrix server: any request would 404 and
    // the test would render the transport failure text instead.

    h.inject_text(9, "Планы на день").await;

    let sent = h.channel.wait_for_sent(1).await;
    assert_eq!(
        sent[0].text,
        "Планы на день:\nWebhook URL не установлен. Пожалуйста, установите Webhook URL для Битрикс24."
    );
    assert!(h.bitrix_server.received_requests().await.unwrap().is_empty());

    h.stop().await;
}

#[tokio::test]
async fn failed_transcription_is_reported_and_retryable() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "upload_url": "https://cdn.example/audio/1"
        })))
        .mount(&h.speech_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-1",
            "status": "error",
            "error": "audio too short"
        })))
        .mount(&h.speech_server)
        .await;

    h.channel
        .inject_event(InboundEvent {
            chat_id: ChatId(2),
            kind: InboundKind::Voice {
                data: vec![0u8; 4],
                duration_secs: None,
            },
        })
        .await;

    let sent = h.channel.wait_for_sent(1).await;
    assert_eq!(
        sent[0].text,
        "Извините, произошла ошибка при транскрипции аудио."
    );

    h.stop().await;
}
