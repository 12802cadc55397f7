// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task backend trait for the remote task-management system.

use async_trait::async_trait;

use crate::types::{ChatId, CreateTaskOutcome, ListTasksOutcome, NewTask, PlanPeriod};

/// Remote task backend operations, scoped by the chat's stored credentials.
///
/// Both operations return tagged outcomes instead of errors: missing
/// credentials, remote rejection, and transport failure are all ordinary
/// outcomes the dialog renders to text. Implementations must check the
/// credential gates before issuing any network call and log transport
/// detail at their own boundary.
#[async_trait]
pub trait TaskBackend: Send + Sync + 'static {
    /// Lists tasks whose deadline falls within `[now, now + period)`.
    async fn list_tasks(&self, chat_id: ChatId, period: PlanPeriod) -> ListTasksOutcome;

    /// Creates a task, assigning the chat's stored responsible-party id.
    async fn create_task(&self, chat_id: ChatId, task: NewTask) -> CreateTaskOutcome;
}
