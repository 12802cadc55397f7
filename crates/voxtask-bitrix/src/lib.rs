// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bitrix24 task backend client for the Voxtask bot.
//!
//! Wraps the two REST operations the bot needs, `tasks.task.list` and
//! `tasks.task.add`, against the per-chat webhook base endpoint stored in
//! the credential store. Both operations check their credential gates
//! before any network call and fold transport failures into tagged
//! outcomes, logging the detail here at the client boundary.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, error};

use voxtask_core::error::VoxtaskError;
use voxtask_core::traits::{PluginAdapter, TaskBackend};
use voxtask_core::types::{
    AdapterType, ChatId, CreateTaskOutcome, HealthStatus, ListTasksOutcome, NewTask, PlanPeriod,
    TaskSummary,
};
use voxtask_credentials::CredentialStore;

/// Fields payload for `tasks.task.add`, using Bitrix24's upper-case names.
#[derive(Debug, Serialize)]
struct TaskFields<'a> {
    #[serde(rename = "TITLE")]
    title: &'a str,
    #[serde(rename = "DESCRIPTION")]
    description: &'a str,
    #[serde(rename = "RESPONSIBLE_ID")]
    responsible_id: &'a str,
    #[serde(rename = "DEADLINE")]
    deadline: &'a str,
}

#[derive(Debug, Serialize)]
struct AddTaskRequest<'a> {
    fields: TaskFields<'a>,
}

/// Inclusive-start deadline window `[now, now + period)` for task listing.
pub fn deadline_window(now: DateTime<Utc>, period: PlanPeriod) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::days(period.days()))
}

/// Bitrix24 REST client implementing [`TaskBackend`].
///
/// Holds no endpoint of its own: every request is addressed to the webhook
/// URL stored for the requesting chat.
pub struct BitrixClient {
    client: reqwest::Client,
    credentials: Arc<CredentialStore>,
}

impl BitrixClient {
    /// Creates a client over the given credential store.
    pub fn new(credentials: Arc<CredentialStore>) -> Result<Self, VoxtaskError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| VoxtaskError::Backend {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            credentials,
        })
    }

    async fn fetch_tasks(
        &self,
        webhook_url: &str,
        period: PlanPeriod,
    ) -> Result<Vec<TaskSummary>, VoxtaskError> {
        let (from, to) = deadline_window(Utc::now(), period);

        let response = self
            .client
            .get(format!("{webhook_url}/tasks.task.list"))
            .query(&[
                ("filter[>DEADLINE]", from.to_rfc3339()),
                ("filter[<DEADLINE]", to.to_rfc3339()),
            ])
            .send()
            .await
            .map_err(|e| VoxtaskError::Backend {
                message: format!("task list request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoxtaskError::Backend {
                message: format!("task list returned {status}: {body}"),
                source: None,
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| VoxtaskError::Backend {
                message: format!("failed to parse task list response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let tasks = body
            .get("result")
            .and_then(|r| r.get("tasks"))
            .cloned()
            .ok_or_else(|| VoxtaskError::Backend {
                message: "task list response missing result.tasks".into(),
                source: None,
            })?;

        serde_json::from_value(tasks).map_err(|e| VoxtaskError::Backend {
            message: format!("failed to parse task entries: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn submit_task(
        &self,
        webhook_url: &str,
        responsible_id: &str,
        task: &NewTask,
    ) -> Result<bool, VoxtaskError> {
        let request = AddTaskRequest {
            fields: TaskFields {
                title: &task.title,
                description: &task.description,
                responsible_id,
                deadline: &task.deadline,
            },
        };

        let response = self
            .client
            .post(format!("{webhook_url}/tasks.task.add"))
            .json(&request)
            .send()
            .await
            .map_err(|e| VoxtaskError::Backend {
                message: format!("task creation request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoxtaskError::Backend {
                message: format!("task creation returned {status}: {body}"),
                source: None,
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| VoxtaskError::Backend {
                message: format!("failed to parse task creation response: {e}"),
                source: Some(Box::new(e)),
            })?;

        // Bitrix24 reports success via a truthy `result` field.
        let accepted = match body.get("result") {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(b)) => *b,
            Some(_) => true,
        };
        Ok(accepted)
    }
}

#[async_trait]
impl TaskBackend for BitrixClient {
    async fn list_tasks(&self, chat_id: ChatId, period: PlanPeriod) -> ListTasksOutcome {
        let credential = self.credentials.get(chat_id).await;
        let Some(webhook_url) = credential.webhook_url else {
            debug!(chat_id = %chat_id, "task list refused: no webhook configured");
            return ListTasksOutcome::MissingWebhook;
        };

        match self.fetch_tasks(&webhook_url, period).await {
            Ok(tasks) if tasks.is_empty() => ListTasksOutcome::NoTasks,
            Ok(tasks) => {
                debug!(chat_id = %chat_id, period = %period, count = tasks.len(), "tasks listed");
                ListTasksOutcome::Tasks(tasks)
            }
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "task list failed");
                ListTasksOutcome::TransportFailed
            }
        }
    }

    async fn create_task(&self, chat_id: ChatId, task: NewTask) -> CreateTaskOutcome {
        let credential = self.credentials.get(chat_id).await;
        let Some(webhook_url) = credential.webhook_url else {
            debug!(chat_id = %chat_id, "task creation refused: no webhook configured");
            return CreateTaskOutcome::MissingWebhook;
        };
        let Some(responsible_id) = credential.user_id else {
            debug!(chat_id = %chat_id, "task creation refused: no user id configured");
            return CreateTaskOutcome::MissingUserId;
        };

        match self.submit_task(&webhook_url, &responsible_id, &task).await {
            Ok(true) => {
                debug!(chat_id = %chat_id, title = %task.title, "task created");
                CreateTaskOutcome::Created
            }
            Ok(false) => {
                error!(chat_id = %chat_id, "task creation rejected by backend");
                CreateTaskOutcome::Rejected
            }
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "task creation failed");
                CreateTaskOutcome::TransportFailed
            }
        }
    }
}

#[async_trait]
impl PluginAdapter for BitrixClient {
    fn name(&self) -> &str {
        "bitrix24"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::TaskBackend
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxtaskError> {
        // Endpoints are per-chat webhooks; there is no global endpoint to
        // probe without a chat's credentials.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VoxtaskError> {
        Ok(())
    }
}
