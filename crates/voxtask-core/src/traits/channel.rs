// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::VoxtaskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelCapabilities, InboundEvent, MessageId, OutboundMessage};

/// Adapter for bidirectional messaging channel integrations.
///
/// Channel adapters connect the bot to an external messaging platform,
/// handling event ingestion (text, voice, button presses) and delivery
/// of outbound messages with optional keyboards.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Returns the capabilities supported by this channel.
    fn capabilities(&self) -> ChannelCapabilities;

    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), VoxtaskError>;

    /// Sends a message through the channel.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, VoxtaskError>;

    /// Receives the next inbound event from the channel.
    async fn receive(&self) -> Result<InboundEvent, VoxtaskError>;
}
