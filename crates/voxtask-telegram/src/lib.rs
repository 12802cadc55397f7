// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Voxtask bot.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide:
//! long polling for messages and callback queries, voice file download,
//! and rendering of the command menu and transcript action buttons.

pub mod handler;
pub mod media;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, Recipient,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use voxtask_config::model::TelegramConfig;
use voxtask_core::traits::{ChannelAdapter, PluginAdapter};
use voxtask_core::{
    AdapterType, CallbackAction, ChannelCapabilities, HealthStatus, InboundEvent, MessageId,
    OutboundMessage, ReplyMarkup, VoxtaskError,
};

/// Telegram channel adapter implementing [`ChannelAdapter`].
///
/// Connects via long polling; messages and button presses are converted
/// to inbound events and queued for the agent loop to consume.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundEvent>>,
    inbound_tx: mpsc::Sender<InboundEvent>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, VoxtaskError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            VoxtaskError::Config("telegram.bot_token is required for Telegram adapter".into())
        })?;

        if token.is_empty() {
            return Err(VoxtaskError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxtaskError> {
        // Check if the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), VoxtaskError> {
        debug!("Telegram channel shutting down");
        // The polling handle is aborted when TelegramChannel is dropped;
        // the agent loop stops calling receive() first.
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_voice: true,
            supports_inline_buttons: true,
            supports_reply_keyboard: true,
            max_message_length: Some(4096),
        }
    }

    async fn connect(&mut self) -> Result<(), VoxtaskError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let bot = self.bot.clone();
        let msg_tx = self.inbound_tx.clone();
        let query_tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let message_branch = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let tx = msg_tx.clone();
                async move {
                    match handler::extract_event(&bot, &msg).await {
                        Ok(Some(event)) => {
                            if tx.send(event).await.is_err() {
                                warn!("inbound channel closed, dropping message");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(error = %e, "failed to extract message content");
                        }
                    }
                    respond(())
                }
            });

            let callback_branch =
                Update::filter_callback_query().endpoint(move |bot: Bot, query: CallbackQuery| {
                    let tx = query_tx.clone();
                    async move {
                        // Ack the press so the client stops its spinner.
                        if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
                            debug!(error = %e, "failed to answer callback query");
                        }

                        if let Some(event) = handler::callback_to_event(&query)
                            && tx.send(event).await.is_err()
                        {
                            warn!("inbound channel closed, dropping callback");
                        }
                        respond(())
                    }
                });

            let handler = dptree::entry()
                .branch(message_branch)
                .branch(callback_branch);

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {}) // Silently ignore other updates
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, VoxtaskError> {
        let chat_id = teloxide::types::ChatId(msg.chat_id.0);
        let request = self.bot.send_message(Recipient::Id(chat_id), &msg.text);

        let result = match msg.markup {
            Some(ReplyMarkup::MainMenu) => request.reply_markup(main_menu_keyboard()).await,
            Some(ReplyMarkup::TranscriptActions) => {
                request.reply_markup(transcript_actions_keyboard()).await
            }
            None => request.await,
        }
        .map_err(|e| VoxtaskError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(MessageId(result.id.0.to_string()))
    }

    async fn receive(&self) -> Result<InboundEvent, VoxtaskError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| VoxtaskError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }
}

/// The persistent command menu: two rows of reply-keyboard buttons whose
/// labels double as the commands the dialog engine recognizes.
fn main_menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new([
        vec![
            KeyboardButton::new("Создать задачу"),
            KeyboardButton::new("Планы на день"),
        ],
        vec![
            KeyboardButton::new("Планы на неделю"),
            KeyboardButton::new("Планы на месяц"),
            KeyboardButton::new("Установить Webhook URL"),
            KeyboardButton::new("Установить User ID"),
        ],
    ])
    .resize_keyboard()
    .one_time_keyboard()
}

/// The edit / confirm inline button pair shown under a transcript.
fn transcript_actions_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback("Изменить текст", CallbackAction::EditText.to_string()),
        InlineKeyboardButton::callback(
            "Подтвердить и создать задачу",
            CallbackAction::ConfirmAndCreateTask.to_string(),
        ),
    ]])
}
