// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report content layer: prompt templates, language normalization, the
//! quantitative risk model, structured-output normalization, and the
//! generation pipeline that ties them to a text provider.

pub mod generator;
pub mod language;
pub mod output;
pub mod prompts;
pub mod risk;

pub use generator::{REPORT_TEMPERATURE, ReportGenerator};
pub use language::{normalize_input_language, normalize_language_code};
pub use output::normalize_output;
pub use prompts::{build_user_payload, chat_system_prompt, visible_context};
pub use risk::{RiskBand, RiskSubscores};
