// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ResultStore trait.

use async_trait::async_trait;
use tracing::debug;

use sentria_config::model::StorageConfig;
use sentria_core::{ReportRecord, ResultStore, SentriaError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed result store.
///
/// Wraps a [`Database`] handle and delegates query operations to the typed
/// query module. Timestamps are assigned at save time in UTC.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens the store at the configured path, creating the database and
    /// schema if needed.
    pub async fn open(config: &StorageConfig) -> Result<Self, SentriaError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite result store initialized");
        Ok(Self { db })
    }

    /// Checkpoints and closes the underlying database.
    pub async fn close(&self) -> Result<(), SentriaError> {
        self.db.close().await
    }
}

#[async_trait]
impl ResultStore for SqliteStore {
    async fn save(
        &self,
        request_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<(), SentriaError> {
        let now = chrono::Utc::now().to_rfc3339();
        queries::reports::upsert_report(&self.db, request_id, user_id, text, &now).await
    }

    async fn fetch_latest(
        &self,
        request_id: i64,
        user_id: Option<i64>,
    ) -> Result<Option<ReportRecord>, SentriaError> {
        queries::reports::fetch_latest(&self.db, request_id, user_id).await
    }
}
