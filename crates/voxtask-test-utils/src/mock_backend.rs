// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock task backend recording submissions and returning scripted outcomes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use voxtask_core::traits::TaskBackend;
use voxtask_core::{ChatId, CreateTaskOutcome, ListTasksOutcome, NewTask, PlanPeriod};

/// A recorded `create_task` invocation.
#[derive(Debug, Clone)]
pub struct CreateCall {
    pub chat_id: ChatId,
    pub task: NewTask,
}

/// A mock task backend for dialog tests.
///
/// Listing returns a fixed outcome (defaults to `NoTasks`); task creation
/// records every invocation and answers with a fixed outcome (defaults to
/// `Created`). Recorded calls can be asserted on after the dialog runs.
pub struct MockBackend {
    list_outcome: Arc<Mutex<ListTasksOutcome>>,
    create_outcome: Arc<Mutex<CreateTaskOutcome>>,
    create_calls: Arc<Mutex<Vec<CreateCall>>>,
    list_calls: Arc<Mutex<Vec<(ChatId, PlanPeriod)>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            list_outcome: Arc::new(Mutex::new(ListTasksOutcome::NoTasks)),
            create_outcome: Arc::new(Mutex::new(CreateTaskOutcome::Created)),
            create_calls: Arc::new(Mutex::new(Vec::new())),
            list_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the outcome returned by subsequent `list_tasks` calls.
    pub async fn set_list_outcome(&self, outcome: ListTasksOutcome) {
        *self.list_outcome.lock().await = outcome;
    }

    /// Set the outcome returned by subsequent `create_task` calls.
    pub async fn set_create_outcome(&self, outcome: CreateTaskOutcome) {
        *self.create_outcome.lock().await = outcome;
    }

    /// All `create_task` invocations observed so far.
    pub async fn create_calls(&self) -> Vec<CreateCall> {
        self.create_calls.lock().await.clone()
    }

    /// All `list_tasks` invocations observed so far.
    pub async fn list_calls(&self) -> Vec<(ChatId, PlanPeriod)> {
        self.list_calls.lock().await.clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskBackend for MockBackend {
    async fn list_tasks(&self, chat_id: ChatId, period: PlanPeriod) -> ListTasksOutcome {
        self.list_calls.lock().await.push((chat_id, period));
        self.list_outcome.lock().await.clone()
    }

    async fn create_task(&self, chat_id: ChatId, task: NewTask) -> CreateTaskOutcome {
        self.create_calls.lock().await.push(CreateCall { chat_id, task });
        self.create_outcome.lock().await.clone()
    }
}
