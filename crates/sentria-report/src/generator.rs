// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report generation pipeline: prompt assembly, provider call, and
//! mode-dependent output normalization.

use std::sync::Arc;

use sentria_core::{CrisisInput, GenerationRequest, ReportMode, SentriaError, TextGenerator};
use tracing::debug;

use crate::output::normalize_output;
use crate::prompts::{NARRATIVE_SYSTEM_PROMPT, build_user_payload, structured_system_prompt};

/// Sampling temperature for report generation. Kept low: the output is an
/// operational document, not creative writing.
pub const REPORT_TEMPERATURE: f32 = 0.2;

/// Turns a crisis input into a persisted-ready report text via the
/// configured provider.
#[derive(Clone)]
pub struct ReportGenerator {
    provider: Arc<dyn TextGenerator>,
    mode: ReportMode,
}

impl ReportGenerator {
    pub fn new(provider: Arc<dyn TextGenerator>, mode: ReportMode) -> Self {
        Self { provider, mode }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Generates a report for the given input.
    ///
    /// Structured input takes priority over the free-text fallback. In
    /// structured mode the provider's output is normalized to canonical JSON
    /// before being returned; malformed output is an error, not a result.
    pub async fn generate(
        &self,
        data: Option<CrisisInput>,
        data_raw: Option<&str>,
    ) -> Result<String, SentriaError> {
        let system = match self.mode {
            ReportMode::Narrative => NARRATIVE_SYSTEM_PROMPT.to_string(),
            ReportMode::Structured => structured_system_prompt(),
        };
        let user = build_user_payload(data, data_raw)?;
        debug!(mode = %self.mode, payload_len = user.len(), "requesting report");

        let raw = self
            .provider
            .complete(GenerationRequest {
                system,
                user,
                temperature: Some(REPORT_TEMPERATURE),
            })
            .await?;

        match self.mode {
            ReportMode::Narrative => Ok(raw),
            ReportMode::Structured => normalize_output(&raw),
        }
    }
}
