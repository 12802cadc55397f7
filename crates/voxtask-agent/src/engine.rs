// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog engine: the per-chat transition table.
//!
//! [`DialogEngine::handle`] consumes one inbound event, mutates the chat's
//! session, and returns the messages to send back. It holds no per-chat
//! state of its own, so one engine instance is shared by every chat
//! worker.
//!
//! Out-of-order input policy: a recognized menu command, a button press,
//! or a voice message arriving while a one-shot prompt is pending cancels
//! that prompt and is handled normally. Only plain, non-command text is
//! consumed as the prompt's answer.

use std::sync::Arc;

use tracing::{debug, warn};

use voxtask_core::traits::{SpeechTranscriber, TaskBackend};
use voxtask_core::{
    CallbackAction, ChatId, InboundEvent, InboundKind, NewTask, OutboundMessage, PlanPeriod,
    ReplyMarkup,
};
use voxtask_credentials::CredentialStore;

use crate::commands::Command;
use crate::messages;
use crate::session::{ChatSession, Stage};

/// Stateless dialog logic shared across all chats.
pub struct DialogEngine {
    credentials: Arc<CredentialStore>,
    transcriber: Arc<dyn SpeechTranscriber>,
    backend: Arc<dyn TaskBackend>,
}

impl DialogEngine {
    pub fn new(
        credentials: Arc<CredentialStore>,
        transcriber: Arc<dyn SpeechTranscriber>,
        backend: Arc<dyn TaskBackend>,
    ) -> Self {
        Self {
            credentials,
            transcriber,
            backend,
        }
    }

    /// Handles one inbound event for the given chat session.
    pub async fn handle(
        &self,
        session: &mut ChatSession,
        event: InboundEvent,
    ) -> Vec<OutboundMessage> {
        let chat_id = event.chat_id;
        match event.kind {
            InboundKind::Text(text) => match Command::parse(&text) {
                Some(command) => {
                    if session.stage().awaiting_input() {
                        debug!(%chat_id, stage = %session.stage(), "command cancels pending prompt");
                        session.cancel_prompt();
                    }
                    self.handle_command(chat_id, session, command).await
                }
                None => self.handle_answer(chat_id, session, text).await,
            },
            InboundKind::Voice { data, .. } => {
                if session.stage().awaiting_input() {
                    debug!(%chat_id, stage = %session.stage(), "voice message cancels pending prompt");
                    session.cancel_prompt();
                }
                self.handle_voice(chat_id, session, &data).await
            }
            InboundKind::Callback(action) => {
                if session.stage().awaiting_input() {
                    debug!(%chat_id, stage = %session.stage(), "callback cancels pending prompt");
                    session.cancel_prompt();
                }
                match action {
                    CallbackAction::EditText => self.begin_edit(chat_id, session),
                    CallbackAction::ConfirmAndCreateTask => {
                        self.begin_confirm(chat_id, session).await
                    }
                }
            }
        }
    }

    async fn handle_command(
        &self,
        chat_id: ChatId,
        session: &mut ChatSession,
        command: Command,
    ) -> Vec<OutboundMessage> {
        match command {
            Command::Start => vec![OutboundMessage::with_markup(
                chat_id,
                messages::WELCOME,
                ReplyMarkup::MainMenu,
            )],
            Command::CreateTask => {
                let credential = self.credentials.get(chat_id).await;
                if credential.user_id.is_none() {
                    return vec![OutboundMessage::text(chat_id, messages::SET_USER_ID_FIRST)];
                }
                if credential.webhook_url.is_none() {
                    return vec![OutboundMessage::text(chat_id, messages::SET_WEBHOOK_FIRST)];
                }
                vec![OutboundMessage::text(chat_id, messages::SEND_VOICE_PROMPT)]
            }
            Command::EditText => self.begin_edit(chat_id, session),
            Command::Plans(period) => self.list_plans(chat_id, period).await,
            Command::SetWebhook => {
                session.set_stage(Stage::AwaitingWebhook);
                vec![OutboundMessage::text(chat_id, messages::WEBHOOK_PROMPT)]
            }
            Command::SetUserId => {
                session.set_stage(Stage::AwaitingUserId);
                vec![OutboundMessage::text(chat_id, messages::USER_ID_PROMPT)]
            }
        }
    }

    /// Plain text consumed as the answer to whatever prompt is pending.
    async fn handle_answer(
        &self,
        chat_id: ChatId,
        session: &mut ChatSession,
        text: String,
    ) -> Vec<OutboundMessage> {
        match session.stage() {
            // Free text outside any flow is ignored.
            Stage::Idle => Vec::new(),
            Stage::AwaitingNewText => {
                session.pending_transcript = Some(text.clone());
                session.set_stage(Stage::AwaitingTitle);
                vec![
                    OutboundMessage::text(chat_id, messages::text_updated(&text)),
                    OutboundMessage::text(chat_id, messages::TITLE_PROMPT),
                ]
            }
            Stage::AwaitingTitle => {
                session.title = Some(text);
                session.set_stage(Stage::AwaitingDeadline);
                vec![OutboundMessage::text(chat_id, messages::DEADLINE_PROMPT)]
            }
            Stage::AwaitingDeadline => self.submit_task(chat_id, session, text).await,
            Stage::AwaitingWebhook => {
                let reply = match self.credentials.set_webhook(chat_id, &text).await {
                    Ok(()) => messages::webhook_set(&text),
                    Err(e) => {
                        warn!(%chat_id, error = %e, "failed to persist webhook");
                        messages::SETTINGS_SAVE_FAILED.to_string()
                    }
                };
                session.set_stage(Stage::Idle);
                vec![OutboundMessage::text(chat_id, reply)]
            }
            Stage::AwaitingUserId => {
                let reply = match self.credentials.set_user_id(chat_id, &text).await {
                    Ok(()) => messages::user_id_set(&text),
                    Err(e) => {
                        warn!(%chat_id, error = %e, "failed to persist user id");
                        messages::SETTINGS_SAVE_FAILED.to_string()
                    }
                };
                session.set_stage(Stage::Idle);
                vec![OutboundMessage::text(chat_id, reply)]
            }
        }
    }

    async fn handle_voice(
        &self,
        chat_id: ChatId,
        session: &mut ChatSession,
        data: &[u8],
    ) -> Vec<OutboundMessage> {
        match self.transcriber.transcribe(data).await {
            Ok(text) => {
                debug!(%chat_id, chars = text.chars().count(), "voice transcribed");
                session.pending_transcript = Some(text.clone());
                vec![OutboundMessage::with_markup(
                    chat_id,
                    messages::transcript(&text),
                    ReplyMarkup::TranscriptActions,
                )]
            }
            Err(e) => {
                // Session stays retryable: no transcript stored, stage untouched.
                warn!(%chat_id, error = %e, "transcription failed");
                vec![OutboundMessage::text(chat_id, messages::TRANSCRIPTION_FAILED)]
            }
        }
    }

    /// Shared entry for the "edit text" button and the typed command.
    fn begin_edit(&self, chat_id: ChatId, session: &mut ChatSession) -> Vec<OutboundMessage> {
        match &session.pending_transcript {
            Some(current) => {
                let prompt = messages::current_text_prompt(current);
                session.set_stage(Stage::AwaitingNewText);
                vec![OutboundMessage::text(chat_id, prompt)]
            }
            None => vec![OutboundMessage::text(chat_id, messages::NOTHING_TO_EDIT)],
        }
    }

    /// The "confirm and create" button: credential gates re-checked at
    /// the moment of firing, then the title/deadline sequence begins.
    async fn begin_confirm(
        &self,
        chat_id: ChatId,
        session: &mut ChatSession,
    ) -> Vec<OutboundMessage> {
        if session.pending_transcript.is_none() {
            return vec![OutboundMessage::text(chat_id, messages::NOTHING_TO_CONFIRM)];
        }
        let credential = self.credentials.get(chat_id).await;
        if credential.user_id.is_none() {
            return vec![OutboundMessage::text(chat_id, messages::SET_USER_ID_FIRST)];
        }
        if credential.webhook_url.is_none() {
            return vec![OutboundMessage::text(chat_id, messages::SET_WEBHOOK_FIRST)];
        }
        session.set_stage(Stage::AwaitingTitle);
        vec![OutboundMessage::text(chat_id, messages::TITLE_PROMPT)]
    }

    /// Final step of the create flow: the deadline answer triggers the
    /// backend call, and the session is reset whatever the outcome.
    async fn submit_task(
        &self,
        chat_id: ChatId,
        session: &mut ChatSession,
        deadline: String,
    ) -> Vec<OutboundMessage> {
        let task = NewTask {
            title: session.title.take().unwrap_or_default(),
            description: session.pending_transcript.clone().unwrap_or_default(),
            deadline,
        };
        let outcome = self.backend.create_task(chat_id, task).await;
        session.reset();
        vec![OutboundMessage::text(chat_id, messages::create_result(&outcome))]
    }

    async fn list_plans(&self, chat_id: ChatId, period: PlanPeriod) -> Vec<OutboundMessage> {
        let outcome = self.backend.list_tasks(chat_id, period).await;
        vec![OutboundMessage::text(
            chat_id,
            messages::plans(period, &outcome),
        )]
    }
}
