// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Voxtask integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockChannel`] - Mock messaging channel with event injection and capture
//! - [`MockTranscriber`] - Mock speech transcriber with scripted results
//! - [`MockBackend`] - Mock task backend recording submitted tasks

pub mod mock_backend;
pub mod mock_channel;
pub mod mock_transcriber;

pub use mock_backend::MockBackend;
pub use mock_channel::MockChannel;
pub use mock_transcriber::MockTranscriber;
