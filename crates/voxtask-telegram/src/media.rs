// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voice file download for Telegram messages.
//!
//! Telegram references attachments by an opaque file id; downloading
//! resolves it via the Bot API's `getFile` and fetches the bytes.

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileMeta, Voice};
use tracing::debug;

use voxtask_core::VoxtaskError;

/// Downloads a file from Telegram servers by its file metadata.
pub async fn download_file(bot: &Bot, file_meta: &FileMeta) -> Result<Vec<u8>, VoxtaskError> {
    let file = bot
        .get_file(file_meta.id.clone())
        .await
        .map_err(|e| VoxtaskError::Channel {
            message: format!("failed to get file info: {e}"),
            source: Some(Box::new(e)),
        })?;

    let mut buf = Vec::new();
    bot.download_file(&file.path, &mut buf)
        .await
        .map_err(|e| VoxtaskError::Channel {
            message: format!("failed to download file: {e}"),
            source: Some(Box::new(e)),
        })?;

    debug!(
        file_id = %file_meta.id,
        size = buf.len(),
        "downloaded file from Telegram"
    );
    Ok(buf)
}

/// Downloads a voice note (typically OGG/Opus) and captures its duration.
pub async fn download_voice(
    bot: &Bot,
    voice: &Voice,
) -> Result<(Vec<u8>, Option<f32>), VoxtaskError> {
    let data = download_file(bot, &voice.file).await?;
    let duration_secs = Some(voice.duration.seconds() as f32);
    Ok((data, duration_secs))
}
