// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AssemblyAI transcription client for the Voxtask bot.
//!
//! Implements [`voxtask_core::SpeechTranscriber`] over the AssemblyAI v2
//! HTTP API: binary upload, job submission with a language hint, and
//! bounded fixed-interval status polling.

pub mod client;
pub mod types;

pub use client::AssemblyAiClient;
pub use types::{TranscriptResponse, TranscriptStatus};
