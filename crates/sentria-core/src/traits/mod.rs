// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits for the external generator and the result store.

pub mod generator;
pub mod store;

pub use generator::{TextGenerator, TextStream};
pub use store::ResultStore;
