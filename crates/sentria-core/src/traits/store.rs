// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait for the durable result store.

use async_trait::async_trait;

use crate::error::SentriaError;
use crate::types::ReportRecord;

/// Durable key-value-like persistence for generated reports.
///
/// One logical record is authoritative per `(request_id, user_id)`; a new
/// generation for the same key overwrites both the raw and edited text in
/// place (last-write-wins, no history).
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Upserts a report. On first write, `edited_result` is initialized to
    /// the same text so readers always see a non-empty edited copy.
    async fn save(
        &self,
        request_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<(), SentriaError>;

    /// Fetches the most recent record for `request_id`.
    ///
    /// With `user_id = None` the lookup ignores ownership (the shared
    /// request-cache scope); with `Some`, only that user's record matches.
    async fn fetch_latest(
        &self,
        request_id: i64,
        user_id: Option<i64>,
    ) -> Result<Option<ReportRecord>, SentriaError>;
}
