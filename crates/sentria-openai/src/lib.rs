// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Chat Completions provider for the Sentria crisis report service.
//!
//! Implements the [`sentria_core::TextGenerator`] trait: non-streaming
//! completions for report generation and SSE streaming for chat.

pub mod client;
pub mod sse;
pub mod types;

pub use client::OpenAiClient;
