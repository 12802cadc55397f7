// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update conversion: Telegram messages and callback queries into
//! channel-agnostic [`InboundEvent`]s.

use std::str::FromStr;

use teloxide::prelude::*;
use tracing::debug;

use voxtask_core::{CallbackAction, ChatId as VoxChatId, InboundEvent, InboundKind, VoxtaskError};

use crate::media;

/// Extracts an inbound event from a Telegram message.
///
/// Text becomes [`InboundKind::Text`]; voice notes are downloaded to
/// bytes and become [`InboundKind::Voice`]. Other message types
/// (stickers, photos, locations) return `None` and are ignored.
pub async fn extract_event(bot: &Bot, msg: &Message) -> Result<Option<InboundEvent>, VoxtaskError> {
    let chat_id = VoxChatId(msg.chat.id.0);

    if let Some(text) = msg.text() {
        return Ok(Some(InboundEvent {
            chat_id,
            kind: InboundKind::Text(text.to_string()),
        }));
    }

    if let Some(voice) = msg.voice() {
        let (data, duration_secs) = media::download_voice(bot, voice).await?;
        return Ok(Some(InboundEvent {
            chat_id,
            kind: InboundKind::Voice {
                data,
                duration_secs,
            },
        }));
    }

    debug!(msg_id = msg.id.0, "ignoring unsupported message type");
    Ok(None)
}

/// Converts a callback query into an inbound event.
///
/// Returns `None` when the query carries no data, no originating
/// message, or an unrecognized action token.
pub fn callback_to_event(query: &CallbackQuery) -> Option<InboundEvent> {
    let chat_id = query.message.as_ref().map(|m| VoxChatId(m.chat().id.0))?;
    let data = query.data.as_deref()?;

    match CallbackAction::from_str(data) {
        Ok(action) => Some(InboundEvent {
            chat_id,
            kind: InboundKind::Callback(action),
        }),
        Err(_) => {
            debug!(%chat_id, data, "ignoring unknown callback action");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a mock private chat message from JSON, matching Telegram Bot API structure.
    fn make_text_message(chat_id: i64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": chat_id,
                "type": "private",
                "first_name": "Test",
            },
            "from": {
                "id": 12345u64,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    fn make_callback_query(chat_id: i64, data: Option<&str>) -> CallbackQuery {
        let mut json = serde_json::json!({
            "id": "query-1",
            "from": {
                "id": 12345u64,
                "is_bot": false,
                "first_name": "Test",
            },
            "chat_instance": "instance-1",
            "message": {
                "message_id": 2,
                "date": 1700000000i64,
                "chat": {
                    "id": chat_id,
                    "type": "private",
                    "first_name": "Test",
                },
                "text": "Транскрипция: купить молоко",
            },
        });
        if let Some(d) = data {
            json["data"] = serde_json::Value::String(d.to_string());
        }

        serde_json::from_value(json).expect("failed to deserialize mock callback query")
    }

    #[tokio::test]
    async fn extracts_text_event() {
        let bot = Bot::new("test:token");
        let msg = make_text_message(42, "Создать задачу");
        let event = extract_event(&bot, &msg).await.unwrap().unwrap();
        assert_eq!(event.chat_id, VoxChatId(42));
        match event.kind {
            InboundKind::Text(t) => assert_eq!(t, "Создать задачу"),
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[test]
    fn callback_maps_known_actions() {
        let query = make_callback_query(42, Some("edit_text"));
        let event = callback_to_event(&query).unwrap();
        assert_eq!(event.chat_id, VoxChatId(42));
        assert!(matches!(
            event.kind,
            InboundKind::Callback(CallbackAction::EditText)
        ));

        let query = make_callback_query(42, Some("confirm_and_create_task"));
        let event = callback_to_event(&query).unwrap();
        assert!(matches!(
            event.kind,
            InboundKind::Callback(CallbackAction::ConfirmAndCreateTask)
        ));
    }

    #[test]
    fn callback_ignores_unknown_action() {
        let query = make_callback_query(42, Some("delete_everything"));
        assert!(callback_to_event(&query).is_none());
    }

    #[test]
    fn callback_ignores_missing_data() {
        let query = make_callback_query(42, None);
        assert!(callback_to_event(&query).is_none());
    }
}
