// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface for the crisis report service.
//!
//! Routes: GET /health, POST /start, /start_sync, /result, /session, and
//! the SSE-streamed POST /chat.

pub mod chat;
pub mod handlers;
pub mod orchestrator;
pub mod server;

pub use server::{GatewayState, build_router, start_server};

#[cfg(test)]
pub(crate) mod testutil {
    //! In-memory collaborators for handler tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::Router;
    use futures::stream;
    use sentria_core::{
        GenerationRequest, ReportMode, ReportRecord, ResultStore, SentriaError, TextGenerator,
        TextStream,
    };
    use sentria_report::ReportGenerator;
    use sentria_session::SessionSigner;

    use crate::server::GatewayState;

    /// Result store backed by a map, mirroring the upsert semantics of the
    /// SQLite store: one row per `(request_id, user_id)`, overwritten in
    /// place, `created_at` preserved across overwrites.
    #[derive(Default)]
    pub struct MemoryStore {
        rows: Mutex<HashMap<(i64, i64), ReportRecord>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl ResultStore for MemoryStore {
        async fn save(
            &self,
            request_id: i64,
            user_id: i64,
            text: &str,
        ) -> Result<(), SentriaError> {
            let now = chrono_now();
            let mut rows = self.rows.lock().unwrap();
            rows.entry((request_id, user_id))
                .and_modify(|record| {
                    record.result = text.to_string();
                    record.edited_result = text.to_string();
                    record.updated_at = now.clone();
                })
                .or_insert_with(|| ReportRecord {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                    request_id,
                    user_id,
                    result: text.to_string(),
                    edited_result: text.to_string(),
                    created_at: now.clone(),
                    updated_at: now,
                });
            Ok(())
        }

        async fn fetch_latest(
            &self,
            request_id: i64,
            user_id: Option<i64>,
        ) -> Result<Option<ReportRecord>, SentriaError> {
            let rows = self.rows.lock().unwrap();
            let record = match user_id {
                Some(uid) => rows.get(&(request_id, uid)).cloned(),
                None => rows
                    .values()
                    .filter(|r| r.request_id == request_id)
                    .max_by_key(|r| r.id)
                    .cloned(),
            };
            Ok(record)
        }
    }

    fn chrono_now() -> String {
        // Fixed timestamp; the handlers never compare times.
        "2026-01-01T00:00:00+00:00".to_string()
    }

    /// Scriptable generator with call counters.
    pub struct StubProvider {
        reply: String,
        fail_message: Option<String>,
        stream_items: Vec<Result<String, String>>,
        pub complete_calls: AtomicUsize,
        pub stream_calls: AtomicUsize,
        pub last_stream_request: Mutex<Option<GenerationRequest>>,
    }

    impl StubProvider {
        fn build(
            reply: String,
            fail_message: Option<String>,
            stream_items: Vec<Result<String, String>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                reply,
                fail_message,
                stream_items,
                complete_calls: AtomicUsize::new(0),
                stream_calls: AtomicUsize::new(0),
                last_stream_request: Mutex::new(None),
            })
        }

        /// Succeeds with the given text for both call styles.
        pub fn fixed(reply: &str) -> Arc<Self> {
            Self::build(reply.to_string(), None, vec![Ok(reply.to_string())])
        }

        /// Fails every call with a provider error.
        pub fn failing(message: &str) -> Arc<Self> {
            Self::build(String::new(), Some(message.to_string()), Vec::new())
        }

        /// Streams the given fragments; `Err` items become stream errors.
        pub fn streaming(items: Vec<Result<String, String>>) -> Arc<Self> {
            Self::build(String::new(), None, items)
        }

        fn provider_error(message: &str) -> SentriaError {
            SentriaError::Provider {
                message: message.to_string(),
                source: None,
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubProvider {
        async fn complete(&self, _request: GenerationRequest) -> Result<String, SentriaError> {
            self.complete_calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_message {
                Some(message) => Err(Self::provider_error(message)),
                None => Ok(self.reply.clone()),
            }
        }

        async fn stream(&self, request: GenerationRequest) -> Result<TextStream, SentriaError> {
            self.stream_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_stream_request.lock().unwrap() = Some(request);
            if let Some(message) = &self.fail_message {
                return Err(Self::provider_error(message));
            }
            let items: Vec<Result<String, SentriaError>> = self
                .stream_items
                .clone()
                .into_iter()
                .map(|item| item.map_err(|m| Self::provider_error(&m)))
                .collect();
            Ok(Box::pin(stream::iter(items)))
        }
    }

    pub fn state(provider: Arc<StubProvider>, shared_request_cache: bool) -> GatewayState {
        state_with_ttl(provider, shared_request_cache, 7200)
    }

    pub fn state_with_ttl(
        provider: Arc<StubProvider>,
        shared_request_cache: bool,
        ttl_secs: u64,
    ) -> GatewayState {
        let generator_provider: Arc<dyn TextGenerator> = provider.clone();
        GatewayState {
            store: Arc::new(MemoryStore::default()),
            generator: ReportGenerator::new(generator_provider.clone(), ReportMode::Narrative),
            provider: generator_provider,
            signer: SessionSigner::new("test-secret", ttl_secs),
            shared_request_cache,
        }
    }

    pub fn router_from_state(state: GatewayState) -> Router {
        crate::server::build_router(state, &["*".to_string()])
    }

    pub fn router(provider: Arc<StubProvider>, shared_request_cache: bool) -> Router {
        router_from_state(state(provider, shared_request_cache))
    }
}
