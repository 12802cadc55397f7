// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog state machine and agent loop for the Voxtask bot.
//!
//! The [`AgentLoop`] is the central coordinator that:
//! - Receives events from a channel adapter
//! - Routes them to per-chat worker tasks, each owning its own session
//! - Sends the dialog engine's replies back through the channel
//! - Handles graceful shutdown
//!
//! Ordering: events for the same chat are handled in arrival order by
//! that chat's worker; chats never block each other, so a transcription
//! poll in one chat leaves every other chat responsive.

pub mod commands;
pub mod engine;
pub mod messages;
pub mod session;
pub mod shutdown;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use voxtask_core::traits::ChannelAdapter;
use voxtask_core::{ChatId, InboundEvent, InboundKind, VoxtaskError};

use crate::engine::DialogEngine;
use crate::session::ChatSession;

/// Per-chat event queue depth. A chat that outruns its worker by this
/// much gets events dropped with a warning rather than stalling the
/// dispatcher.
const CHAT_QUEUE_CAPACITY: usize = 32;

/// How long shutdown waits for in-flight chat workers to drain.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

struct ChatWorker {
    tx: mpsc::Sender<InboundKind>,
    handle: JoinHandle<()>,
}

/// The main agent loop coordinating event flow between the channel
/// adapter and per-chat dialog workers.
pub struct AgentLoop {
    channel: Arc<dyn ChannelAdapter>,
    engine: Arc<DialogEngine>,
    workers: HashMap<ChatId, ChatWorker>,
}

impl AgentLoop {
    /// Creates a new agent loop over a connected channel adapter.
    pub fn new(channel: Arc<dyn ChannelAdapter>, engine: Arc<DialogEngine>) -> Self {
        Self {
            channel,
            engine,
            workers: HashMap::new(),
        }
    }

    /// Runs the loop until the cancellation token fires or the channel
    /// closes, then drains chat workers.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), VoxtaskError> {
        info!("agent loop running");

        loop {
            tokio::select! {
                event = self.channel.receive() => {
                    match event {
                        Ok(event) => self.dispatch(event),
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            if e.to_string().contains("closed") {
                                break;
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        self.drain().await;
        self.channel.shutdown().await?;

        info!("agent loop stopped");
        Ok(())
    }

    /// Routes an event to its chat's worker, spawning one on first sight.
    fn dispatch(&mut self, event: InboundEvent) {
        let chat_id = event.chat_id;

        // A worker only exits when its sender is dropped; a closed queue
        // here means the task panicked, so replace it with a fresh one
        // (the chat's session state is lost, as it is on restart).
        if let Some(worker) = self.workers.get(&chat_id)
            && worker.tx.is_closed()
        {
            warn!(%chat_id, "chat worker gone, respawning");
            self.workers.remove(&chat_id);
        }

        let worker = self
            .workers
            .entry(chat_id)
            .or_insert_with(|| spawn_chat_worker(chat_id, self.channel.clone(), self.engine.clone()));

        match worker.tx.try_send(event.kind) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(%chat_id, "chat queue full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(%chat_id, "chat worker closed, dropping event");
            }
        }
    }

    /// Drops all queue senders and waits for workers to finish their
    /// in-flight events, up to the drain timeout.
    async fn drain(&mut self) {
        let workers: Vec<_> = self.workers.drain().collect();
        if workers.is_empty() {
            return;
        }
        info!(count = workers.len(), "draining chat workers");

        for (chat_id, worker) in workers {
            drop(worker.tx);
            if tokio::time::timeout(DRAIN_TIMEOUT, worker.handle)
                .await
                .is_err()
            {
                warn!(%chat_id, "chat worker did not drain in time");
            }
        }
    }
}

/// Spawns the task owning one chat's session: it consumes that chat's
/// events in order and sends each reply through the channel.
fn spawn_chat_worker(
    chat_id: ChatId,
    channel: Arc<dyn ChannelAdapter>,
    engine: Arc<DialogEngine>,
) -> ChatWorker {
    let (tx, mut rx) = mpsc::channel::<InboundKind>(CHAT_QUEUE_CAPACITY);

    let handle = tokio::spawn(async move {
        debug!(%chat_id, "chat worker started");
        let mut session = ChatSession::new();

        while let Some(kind) = rx.recv().await {
            let event = InboundEvent { chat_id, kind };
            let replies = engine.handle(&mut session, event).await;
            for reply in replies {
                if let Err(e) = channel.send(reply).await {
                    error!(%chat_id, error = %e, "failed to send reply");
                }
            }
        }

        debug!(%chat_id, "chat worker stopped");
    });

    ChatWorker { tx, handle }
}
