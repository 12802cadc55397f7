// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Voxtask bot.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod backend;
pub mod channel;
pub mod transcriber;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use backend::TaskBackend;
pub use channel::ChannelAdapter;
pub use transcriber::SpeechTranscriber;
