// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, streaming SSE responses, an explicit per-request
//! deadline, and transient error retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use sentria_config::model::OpenAiConfig;
use sentria_core::{GenerationRequest, SentriaError, TextGenerator, TextStream};
use tracing::{debug, warn};

use crate::sse;
use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// Base URL for the OpenAI Chat Completions API.
const API_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Delay before retrying a transient failure.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for OpenAI API communication.
///
/// Report generation goes through [`complete`](TextGenerator::complete)
/// using the configured report model; chat goes through
/// [`stream`](TextGenerator::stream) using the chat model. Transient errors
/// (429, 500, 503, 529) are retried up to `max_retries` times; every call
/// carries an explicit deadline surfaced as [`SentriaError::Timeout`].
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    report_model: String,
    chat_model: String,
    max_retries: u32,
    timeout: Duration,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client from configuration.
    ///
    /// Fails with a `Config` error when no API key is set.
    pub fn new(config: &OpenAiConfig) -> Result<Self, SentriaError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SentriaError::Config("openai.api_key is not set".to_string()))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            SentriaError::Config(format!("invalid API key header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SentriaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            report_model: config.report_model.clone(),
            chat_model: config.chat_model.clone(),
            max_retries: config.max_retries,
            timeout,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn map_send_error(&self, e: reqwest::Error) -> SentriaError {
        if e.is_timeout() {
            SentriaError::Timeout {
                duration: self.timeout,
            }
        } else {
            SentriaError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }

    /// Sends a request, retrying once per transient failure up to the
    /// configured retry budget, and returns the successful raw response.
    async fn send_with_retry(
        &self,
        request: &ChatRequest,
    ) -> Result<reqwest::Response, SentriaError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying request after transient error");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(request)
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, "response received");

            if status.is_success() {
                return Ok(response);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(SentriaError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(SentriaError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| SentriaError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: GenerationRequest) -> Result<String, SentriaError> {
        let chat_request = ChatRequest {
            model: self.report_model.clone(),
            messages: vec![
                ChatMessage::system(request.system),
                ChatMessage::user(request.user),
            ],
            temperature: request.temperature,
            stream: false,
        };

        let response = self.send_with_retry(&chat_request).await?;
        let body = response.text().await.map_err(|e| SentriaError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| SentriaError::Provider {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SentriaError::Provider {
                message: "API response contained no content".into(),
                source: None,
            })
    }

    async fn stream(&self, request: GenerationRequest) -> Result<TextStream, SentriaError> {
        let chat_request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![
                ChatMessage::system(request.system),
                ChatMessage::user(request.user),
            ],
            temperature: request.temperature,
            stream: true,
        };

        let response = self.send_with_retry(&chat_request).await?;
        Ok(sse::parse_text_stream(response))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: Some("sk-test-key".into()),
            report_model: "gpt-4o".into(),
            chat_model: "gpt-4o-mini".into(),
            timeout_secs: 5,
            max_retries: 1,
        }
    }

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new(&test_config())
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn test_request() -> GenerationRequest {
        GenerationRequest {
            system: "You are a crisis advisor.".into(),
            user: "data: {}".into(),
            temperature: None,
        }
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let mut config = test_config();
        config.api_key = None;
        let err = OpenAiClient::new(&config).unwrap_err();
        assert!(matches!(err, SentriaError::Config(_)));
    }

    #[tokio::test]
    async fn complete_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer sk-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("تحليل...")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(test_request()).await.unwrap();
        assert_eq!(result, "تحليل...");
    }

    #[tokio::test]
    async fn complete_retries_on_429() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"type": "rate_limit_error", "message": "Rate limited"}
        });

        // First request returns 429, second returns 200.
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("after retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(test_request()).await.unwrap();
        assert_eq!(result, "after retry");
    }

    #[tokio::test]
    async fn complete_fails_on_400_without_retry() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Bad model"}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete(test_request()).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("invalid_request_error"), "got: {text}");
    }

    #[tokio::test]
    async fn complete_exhausts_retries_on_503() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"type": "overloaded_error", "message": "Service overloaded"}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete(test_request()).await.unwrap_err();
        assert!(err.to_string().contains("overloaded_error"));
    }

    #[tokio::test]
    async fn hung_server_surfaces_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("too late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut config = test_config();
        config.timeout_secs = 1;
        let client = OpenAiClient::new(&config)
            .unwrap()
            .with_base_url(server.uri());

        let err = client.complete(test_request()).await.unwrap_err();
        assert!(matches!(err, SentriaError::Timeout { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn stream_yields_fragments() {
        let server = MockServer::start().await;
        let sse = "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hel\"}}]}\n\n\
                   data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"lo\"}}]}\n\n\
                   data: [DONE]\n\n";

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let stream = client.stream(test_request()).await.unwrap();
        let fragments: Vec<String> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(fragments, vec!["Hel", "lo"]);
    }
}
