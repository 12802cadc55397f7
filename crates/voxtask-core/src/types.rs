// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Voxtask workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a chat on the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a sent message, assigned by the channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a [`crate::traits::PluginAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Channel,
    Transcriber,
    TaskBackend,
}

/// Opaque action token carried by an inline button press.
///
/// Serialized forms are the wire tokens sent as Telegram callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum CallbackAction {
    /// Replace the pending transcript with typed text.
    #[strum(serialize = "edit_text")]
    EditText,
    /// Accept the transcript and start the title/deadline dialog.
    #[strum(serialize = "confirm_and_create_task")]
    ConfirmAndCreateTask,
}

/// An event received from a messaging channel.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Chat the event originates from.
    pub chat_id: ChatId,
    /// Payload of the event.
    pub kind: InboundKind,
}

/// Payload of an inbound chat event.
#[derive(Debug, Clone)]
pub enum InboundKind {
    /// A plain text message (commands included).
    Text(String),
    /// A voice attachment, already downloaded to raw bytes.
    Voice {
        data: Vec<u8>,
        duration_secs: Option<f32>,
    },
    /// An inline button press.
    Callback(CallbackAction),
}

/// A message to be delivered through a channel adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Destination chat.
    pub chat_id: ChatId,
    /// Message body, plain text.
    pub text: String,
    /// Optional keyboard attached to the message.
    pub markup: Option<ReplyMarkup>,
}

impl OutboundMessage {
    /// A plain text message without any keyboard.
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            markup: None,
        }
    }

    /// A text message with an attached keyboard.
    pub fn with_markup(chat_id: ChatId, text: impl Into<String>, markup: ReplyMarkup) -> Self {
        Self {
            chat_id,
            text: text.into(),
            markup: Some(markup),
        }
    }
}

/// Channel-agnostic keyboard attachments.
///
/// Concrete button layouts are rendered by the channel adapter; the
/// dialog engine only names which keyboard it wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// The persistent command menu (reply keyboard).
    MainMenu,
    /// The edit / confirm inline button pair under a transcript.
    TranscriptActions,
}

/// Capabilities reported by a channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    pub supports_voice: bool,
    pub supports_inline_buttons: bool,
    pub supports_reply_keyboard: bool,
    pub max_message_length: Option<usize>,
}

/// Forward-looking deadline window for task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PlanPeriod {
    Day,
    Week,
    Month,
}

impl PlanPeriod {
    /// Length of the window in days, counted forward from now.
    pub const fn days(self) -> i64 {
        match self {
            PlanPeriod::Day => 1,
            PlanPeriod::Week => 7,
            PlanPeriod::Month => 30,
        }
    }
}

/// A task returned by the backend's list operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskSummary {
    pub title: String,
    pub deadline: String,
}

/// A task to be created in the backend.
///
/// The deadline is an opaque `YYYY-MM-DD HH:MM:SS` string passed through
/// verbatim; the backend is the system of record for its validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub deadline: String,
}

/// Outcome of a task listing request.
///
/// Tagged result rendered to user-visible text only at the message
/// renderer; transport failures are folded in (and logged) by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTasksOutcome {
    /// No webhook URL configured for the chat; no network call was made.
    MissingWebhook,
    /// The backend returned an empty result set for the window.
    NoTasks,
    /// Tasks with deadlines inside the requested window.
    Tasks(Vec<TaskSummary>),
    /// The request failed in transport or returned an unreadable body.
    TransportFailed,
}

/// Outcome of a task creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTaskOutcome {
    /// The backend acknowledged the new task.
    Created,
    /// No webhook URL configured for the chat; no network call was made.
    MissingWebhook,
    /// No responsible-party id configured for the chat; no network call was made.
    MissingUserId,
    /// The backend answered but reported failure.
    Rejected,
    /// The request failed in transport or returned an unreadable body.
    TransportFailed,
}
