// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound events
//! and captured outbound messages for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use voxtask_core::VoxtaskError;
use voxtask_core::traits::{ChannelAdapter, PluginAdapter};
use voxtask_core::types::{
    AdapterType, ChannelCapabilities, HealthStatus, InboundEvent, MessageId, OutboundMessage,
};

/// A mock messaging channel for testing.
///
/// Provides two queues:
/// - **inbound**: Events injected via `inject_event()` are returned by `receive()`
/// - **sent**: Messages passed to `send()` are captured and retrievable via `sent_messages()`
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<InboundEvent>>>,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    notify: Arc<Notify>,
    send_notify: Arc<Notify>,
}

impl MockChannel {
    /// Create a new mock channel with empty queues.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            send_notify: Arc::new(Notify::new()),
        }
    }

    /// Inject an inbound event into the receive queue.
    ///
    /// A pending or subsequent call to `receive()` will return it.
    pub async fn inject_event(&self, event: InboundEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// Get all messages that were sent through `send()`.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear all sent messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }

    /// Wait until at least `count` messages have been sent.
    ///
    /// Lets tests synchronize with the agent loop's worker tasks without
    /// sleeping.
    pub async fn wait_for_sent(&self, count: usize) -> Vec<OutboundMessage> {
        loop {
            // Register before checking so a send between the check and the
            // await is not missed (notify_waiters stores no permit).
            let notified = self.send_notify.notified();
            {
                let sent = self.sent.lock().await;
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            notified.await;
        }
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxtaskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VoxtaskError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_voice: true,
            supports_inline_buttons: true,
            supports_reply_keyboard: true,
            max_message_length: None,
        }
    }

    async fn connect(&mut self) -> Result<(), VoxtaskError> {
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, VoxtaskError> {
        let mut sent = self.sent.lock().await;
        sent.push(msg);
        let id = MessageId(format!("mock-msg-{}", sent.len()));
        self.send_notify.notify_waiters();
        Ok(id)
    }

    async fn receive(&self) -> Result<InboundEvent, VoxtaskError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            // Wait for notification that a new event was injected
            self.notify.notified().await;
        }
    }
}
