// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sentria crisis report service.
//!
//! This crate provides the error type, shared domain types, and the traits
//! implemented by the external collaborators (text generator, result store).

pub mod error;
pub mod traits;
pub mod types;

pub use error::SentriaError;
pub use traits::{ResultStore, TextGenerator, TextStream};
pub use types::{CrisisInput, GenerationRequest, ReportMode, ReportRecord, VisibleValue};
