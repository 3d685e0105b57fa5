// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for generated crisis reports.
//!
//! One authoritative row per `(request_id, user_id)`, maintained by a single
//! atomic `INSERT ... ON CONFLICT ... DO UPDATE` upsert (no check-then-act
//! window between readers and writers).

pub mod database;
pub mod queries;
pub mod store;

pub use database::Database;
pub use store::SqliteStore;
