// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable per-chat credential store for the Voxtask bot.
//!
//! Each chat may hold two independent secrets: the Bitrix24 webhook base
//! URL and the responsible-party user id. Each field is persisted as its
//! own flat JSON file mapping chat id (as decimal text) to the value, so
//! setting one field never requires the other to exist. Every mutation
//! rewrites the whole file; a crash before the write completes leaves the
//! previously persisted state intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info};

use voxtask_core::VoxtaskError;
use voxtask_core::types::ChatId;

/// File name for the chat -> webhook URL mapping.
const WEBHOOKS_FILE: &str = "webhooks.json";

/// File name for the chat -> user id mapping.
const USER_IDS_FILE: &str = "user_ids.json";

/// The pair of secrets stored for one chat. Both fields are independently
/// optional; an absent field reads as "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Bitrix24 webhook base endpoint, opaque to this crate.
    pub webhook_url: Option<String>,
    /// Bitrix24 responsible-party identifier, opaque to this crate.
    pub user_id: Option<String>,
}

impl Credential {
    /// True when both fields are present, i.e. task creation is possible.
    pub const fn is_complete(&self) -> bool {
        self.webhook_url.is_some() && self.user_id.is_some()
    }
}

/// In-memory credential maps mirrored by two JSON files on disk.
///
/// Reads are served from memory; every mutation synchronously rewrites the
/// affected file in full. `BTreeMap` keeps the serialized form stable, so
/// writing the same value twice produces byte-identical files.
pub struct CredentialStore {
    inner: Mutex<Inner>,
    webhooks_path: PathBuf,
    user_ids_path: PathBuf,
}

struct Inner {
    webhooks: BTreeMap<String, String>,
    user_ids: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Opens the store rooted at `data_dir`, creating the directory if
    /// needed and loading both files. Missing files read as empty maps.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, VoxtaskError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| VoxtaskError::Storage { source: Box::new(e) })?;

        let webhooks_path = data_dir.join(WEBHOOKS_FILE);
        let user_ids_path = data_dir.join(USER_IDS_FILE);

        let webhooks = load_map(&webhooks_path).await?;
        let user_ids = load_map(&user_ids_path).await?;

        info!(
            dir = %data_dir.display(),
            webhooks = webhooks.len(),
            user_ids = user_ids.len(),
            "credential store opened"
        );

        Ok(Self {
            inner: Mutex::new(Inner { webhooks, user_ids }),
            webhooks_path,
            user_ids_path,
        })
    }

    /// Returns the credential pair for a chat; absent fields are `None`.
    pub async fn get(&self, chat_id: ChatId) -> Credential {
        let key = chat_id.to_string();
        let inner = self.inner.lock().await;
        Credential {
            webhook_url: inner.webhooks.get(&key).cloned(),
            user_id: inner.user_ids.get(&key).cloned(),
        }
    }

    /// Sets the webhook URL for a chat and rewrites the webhook file in full.
    ///
    /// The in-memory map is updated only after the durable write succeeds,
    /// so a failed write leaves both memory and disk at the prior state.
    pub async fn set_webhook(&self, chat_id: ChatId, url: &str) -> Result<(), VoxtaskError> {
        let mut inner = self.inner.lock().await;
        let mut next = inner.webhooks.clone();
        next.insert(chat_id.to_string(), url.to_string());
        persist_map(&self.webhooks_path, &next).await?;
        inner.webhooks = next;
        debug!(chat_id = %chat_id, "webhook URL stored");
        Ok(())
    }

    /// Sets the user id for a chat and rewrites the user-id file in full.
    pub async fn set_user_id(&self, chat_id: ChatId, user_id: &str) -> Result<(), VoxtaskError> {
        let mut inner = self.inner.lock().await;
        let mut next = inner.user_ids.clone();
        next.insert(chat_id.to_string(), user_id.to_string());
        persist_map(&self.user_ids_path, &next).await?;
        inner.user_ids = next;
        debug!(chat_id = %chat_id, "user id stored");
        Ok(())
    }
}

/// Loads a flat chat-id -> value mapping from a JSON file.
async fn load_map(path: &Path) -> Result<BTreeMap<String, String>, VoxtaskError> {
    match tokio::fs::read_to_string(path).await {
        Ok(data) => serde_json::from_str(&data)
            .map_err(|e| VoxtaskError::Storage { source: Box::new(e) }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(VoxtaskError::Storage { source: Box::new(e) }),
    }
}

/// Rewrites the whole mapping as pretty-printed JSON in a single write.
async fn persist_map(path: &Path, map: &BTreeMap<String, String>) -> Result<(), VoxtaskError> {
    let json = serde_json::to_string_pretty(map)
        .map_err(|e| VoxtaskError::Storage { source: Box::new(e) })?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| VoxtaskError::Storage { source: Box::new(e) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_fields_read_as_unset() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path()).await.unwrap();

        let cred = store.get(ChatId(1)).await;
        assert_eq!(cred, Credential::default());
        assert!(!cred.is_complete());
    }

    #[tokio::test]
    async fn fields_are_set_independently() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path()).await.unwrap();

        store
            .set_webhook(ChatId(7), "https://portal.example/rest/1/abc")
            .await
            .unwrap();
        let cred = store.get(ChatId(7)).await;
        assert_eq!(
            cred.webhook_url.as_deref(),
            Some("https://portal.example/rest/1/abc")
        );
        assert!(cred.user_id.is_none());
        assert!(!cred.is_complete());

        store.set_user_id(ChatId(7), "42").await.unwrap();
        let cred = store.get(ChatId(7)).await;
        assert_eq!(cred.user_id.as_deref(), Some("42"));
        assert!(cred.is_complete());
    }

    #[tokio::test]
    async fn values_survive_a_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let store = CredentialStore::open(dir.path()).await.unwrap();
            store
                .set_webhook(ChatId(11), "https://portal.example/rest/9/key")
                .await
                .unwrap();
            store.set_user_id(ChatId(11), "99").await.unwrap();
        }

        // Simulated restart: a fresh store reads only from disk.
        let store = CredentialStore::open(dir.path()).await.unwrap();
        let cred = store.get(ChatId(11)).await;
        assert_eq!(
            cred.webhook_url.as_deref(),
            Some("https://portal.example/rest/9/key")
        );
        assert_eq!(cred.user_id.as_deref(), Some("99"));
    }

    #[tokio::test]
    async fn repeated_write_is_byte_identical() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path()).await.unwrap();

        store.set_webhook(ChatId(3), "https://a.example").await.unwrap();
        store.set_webhook(ChatId(1), "https://b.example").await.unwrap();
        let first = tokio::fs::read(dir.path().join(WEBHOOKS_FILE)).await.unwrap();

        store.set_webhook(ChatId(1), "https://b.example").await.unwrap();
        let second = tokio::fs::read(dir.path().join(WEBHOOKS_FILE)).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn overwrite_replaces_previous_value() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path()).await.unwrap();

        store.set_user_id(ChatId(5), "old").await.unwrap();
        store.set_user_id(ChatId(5), "new").await.unwrap();

        let cred = store.get(ChatId(5)).await;
        assert_eq!(cred.user_id.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn files_are_human_readable_flat_maps() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path()).await.unwrap();
        store.set_webhook(ChatId(21), "https://c.example").await.unwrap();

        let raw = tokio::fs::read_to_string(dir.path().join(WEBHOOKS_FILE))
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["21"], "https://c.example");
        // Pretty printing keeps the file diffable by hand.
        assert!(raw.contains('\n'));
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_not_silently_dropped() {
        let dir = tempfile::TempDir::new().unwrap();
        tokio::fs::write(dir.path().join(WEBHOOKS_FILE), b"not json")
            .await
            .unwrap();

        let result = CredentialStore::open(dir.path()).await;
        assert!(matches!(result, Err(VoxtaskError::Storage { .. })));
    }
}
