// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report upsert and lookup operations.

use rusqlite::{OptionalExtension, params};
use sentria_core::{ReportRecord, SentriaError};

use crate::database::{Database, map_tr_err};

/// Upsert a report in a single atomic statement.
///
/// First write inserts the row with `edited_result` initialized to the same
/// text, so readers always see a non-empty edited copy. Re-generation for an
/// existing `(request_id, user_id)` overwrites both text columns in place and
/// refreshes `updated_at`; `created_at` is preserved. Last write wins, no
/// history is retained.
pub async fn upsert_report(
    db: &Database,
    request_id: i64,
    user_id: i64,
    text: &str,
    now: &str,
) -> Result<(), SentriaError> {
    let text = text.to_string();
    let now = now.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reports (request_id, user_id, result, edited_result, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3, ?4, ?4)
                 ON CONFLICT (request_id, user_id) DO UPDATE SET
                     result = excluded.result,
                     edited_result = excluded.result,
                     updated_at = excluded.updated_at",
                params![request_id, user_id, text, now],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch the most recent report row for `request_id`.
///
/// With `user_id = None` the lookup spans all users (shared request-cache
/// scope); with `Some` it matches only that user's row. Ordered by id
/// descending so the newest row wins when the shared scope spans users.
pub async fn fetch_latest(
    db: &Database,
    request_id: i64,
    user_id: Option<i64>,
) -> Result<Option<ReportRecord>, SentriaError> {
    db.connection()
        .call(move |conn| {
            let map_row = |row: &rusqlite::Row<'_>| {
                Ok(ReportRecord {
                    id: row.get(0)?,
                    request_id: row.get(1)?,
                    user_id: row.get(2)?,
                    result: row.get(3)?,
                    edited_result: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            };
            let record = match user_id {
                Some(uid) => conn
                    .prepare(
                        "SELECT id, request_id, user_id, result, edited_result, created_at, updated_at
                         FROM reports WHERE request_id = ?1 AND user_id = ?2
                         ORDER BY id DESC LIMIT 1",
                    )?
                    .query_row(params![request_id, uid], map_row)
                    .optional()?,
                None => conn
                    .prepare(
                        "SELECT id, request_id, user_id, result, edited_result, created_at, updated_at
                         FROM reports WHERE request_id = ?1
                         ORDER BY id DESC LIMIT 1",
                    )?
                    .query_row(params![request_id], map_row)
                    .optional()?,
            };
            Ok(record)
        })
        .await
        .map_err(map_tr_err)
}
