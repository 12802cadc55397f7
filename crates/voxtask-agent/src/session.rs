// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat dialog session state.
//!
//! Each chat owns exactly one [`ChatSession`], created lazily on its first
//! event and held in volatile memory only. The [`Stage`] enum replaces
//! chained one-shot message handlers with an explicit, enumerable state:
//! a pending prompt is simply the stage the session is parked in until the
//! next plain text message arrives.

/// Dialog stages of a chat session.
///
/// `Idle` covers both "no transcript" and "transcript held awaiting a
/// button press"; the distinction lives in `pending_transcript`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No prompt outstanding.
    Idle,
    /// Waiting for replacement transcript text.
    AwaitingNewText,
    /// Waiting for the task title.
    AwaitingTitle,
    /// Waiting for the task deadline.
    AwaitingDeadline,
    /// Waiting for a webhook URL.
    AwaitingWebhook,
    /// Waiting for a responsible-user id.
    AwaitingUserId,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::AwaitingNewText => write!(f, "awaiting_new_text"),
            Stage::AwaitingTitle => write!(f, "awaiting_title"),
            Stage::AwaitingDeadline => write!(f, "awaiting_deadline"),
            Stage::AwaitingWebhook => write!(f, "awaiting_webhook"),
            Stage::AwaitingUserId => write!(f, "awaiting_user_id"),
        }
    }
}

impl Stage {
    /// True when the session is parked on a one-shot prompt.
    pub fn awaiting_input(self) -> bool {
        self != Stage::Idle
    }
}

/// Volatile per-chat dialog state.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    stage: Option<Stage>,
    /// Transcript awaiting confirmation or edit; doubles as the task
    /// description once the flow reaches the deadline step.
    pub pending_transcript: Option<String>,
    /// Title collected mid-flow, cleared on reset.
    pub title: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage; a fresh session starts idle.
    pub fn stage(&self) -> Stage {
        self.stage.unwrap_or(Stage::Idle)
    }

    /// Move the session to a new stage.
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = Some(stage);
    }

    /// Cancel any pending one-shot prompt, keeping the transcript.
    ///
    /// Used when a command, callback, or voice message takes precedence
    /// over an outstanding prompt.
    pub fn cancel_prompt(&mut self) {
        self.stage = Some(Stage::Idle);
        self.title = None;
    }

    /// Reset everything after a completed task submission so the next
    /// flow starts clean.
    pub fn reset(&mut self) {
        self.stage = Some(Stage::Idle);
        self.pending_transcript = None;
        self.title = None;
    }
}
