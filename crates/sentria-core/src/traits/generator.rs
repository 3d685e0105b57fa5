// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait for the external text-generation collaborator.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::SentriaError;
use crate::types::GenerationRequest;

/// A stream of incremental text fragments from the generator.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, SentriaError>> + Send>>;

/// The external text generator, treated as an opaque fallible collaborator.
///
/// Report generation uses [`complete`](TextGenerator::complete) (the
/// implementation's report model); chat uses
/// [`stream`](TextGenerator::stream) (the implementation's chat model).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends a request and returns the full generated text.
    async fn complete(&self, request: GenerationRequest) -> Result<String, SentriaError>;

    /// Sends a request and returns generated text as incremental fragments,
    /// in arrival order.
    async fn stream(&self, request: GenerationRequest) -> Result<TextStream, SentriaError>;
}
