//! OpenAI-compatible provider implementing the [`Provider`] trait.
//!
//! Builds and sends streaming requests to a `/chat/completions` endpoint and
//! drives the response to completion: SSE frames are decoded, text fragments
//! go to the handler as they arrive, and tool calls accumulated during the
//! stream are resolved and delivered only after the stream ends cleanly.
//!
//! # Authentication
//!
//! Optional Bearer token. Local endpoints (Ollama, llama.cpp, vLLM) usually
//! run without one; hosted endpoints require it.
//!
//! # Cancellation
//!
//! The cancellation token is checked before every chunk request and before
//! every frame dispatch. A cancelled stream stops pulling chunks, fails with
//! [`ProviderError::Cancelled`], and delivers no tool calls; once the
//! terminal frame has been seen, finalization runs to completion.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use brook_core::messages::Context;
use brook_llm::error::{ProviderError, ProviderResult};
use brook_llm::provider::{Provider, ProviderStreamOptions, StreamHandler};
use brook_llm::sse::{SseFrame, parse_sse_frames};
use brook_llm::tool_id::ToolIdMap;

use crate::message_converter::{convert_messages, convert_tools};
use crate::stream_handler::{StreamState, extract_delta, finalize, process_delta};
use crate::types::{ChatRequest, OpenAiCompatibleConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming provider for OpenAI-compatible chat-completion endpoints.
pub struct OpenAiCompatibleProvider {
    /// Provider configuration.
    config: OpenAiCompatibleConfig,
    /// HTTP client (reused across requests).
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider.
    #[must_use]
    pub fn new(config: OpenAiCompatibleConfig) -> Self {
        info!(model = %config.model, base_url = %config.base_url, "provider initialized");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider with a caller-supplied HTTP client.
    #[must_use]
    pub fn with_client(config: OpenAiCompatibleConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Build HTTP headers for the request.
    fn build_headers(&self) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        if let Some(api_key) = &self.config.api_key {
            let auth_value = format!("Bearer {api_key}");
            let _ = headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value).map_err(|e| ProviderError::Other {
                    message: format!("invalid authorization header: {e}"),
                })?,
            );
        }

        Ok(headers)
    }

    /// Resolved completion endpoint URL.
    fn endpoint_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build the request body from context and options.
    fn build_request(
        &self,
        context: &Context,
        options: &ProviderStreamOptions,
    ) -> ProviderResult<ChatRequest> {
        let messages = convert_messages(&context.messages, &self.config.tool_error_format)?;
        let tools = match context.tools.as_deref() {
            Some(tools) if !tools.is_empty() => Some(convert_tools(tools)?),
            _ => None,
        };

        Ok(ChatRequest {
            model: self.config.model.clone(),
            messages,
            tools,
            stream: true,
            temperature: options.temperature,
            top_p: options.top_p,
            max_tokens: options.max_tokens,
            stop: options.stop_sequences.clone(),
        })
    }

    /// Internal streaming implementation.
    async fn stream_internal(
        &self,
        context: &Context,
        options: &ProviderStreamOptions,
        handler: &mut dyn StreamHandler,
        cancel: &CancellationToken,
    ) -> ProviderResult<()> {
        debug!(
            model = %self.config.model,
            message_count = context.messages.len(),
            tool_count = context.tools.as_ref().map_or(0, Vec::len),
            "starting chat-completions stream"
        );

        // Reject ambiguous tool sets before any bytes go out
        let tool_ids = ToolIdMap::from_tools(context.tools.as_deref().unwrap_or(&[]))?;

        let headers = self.build_headers()?;
        let request = self.build_request(context, options)?;

        let response = self
            .client
            .post(self.endpoint_url())
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            let body_text = response.text().await.unwrap_or_default();
            let (mut message, code) = parse_api_error(&body_text, status.as_u16());
            // No retries happen here; the hint is purely informational
            if let Some(retry_after) = retry_after {
                message = format!("{message} (retry after {retry_after}s)");
            }
            error!(status = status.as_u16(), message = %message, "chat-completions request failed");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
                code,
            });
        }

        drive_stream(response.bytes_stream(), &tool_ids, handler, cancel).await
    }
}

/// Consume an SSE byte stream, dispatching text as it arrives and resolved
/// tool calls after the stream ends.
///
/// Stream end is either the `[DONE]` sentinel or byte-stream exhaustion.
/// Failures — transport errors, cancellation, unresolvable tool calls — are
/// all-or-nothing for tool delivery: the handler sees no tool calls at all.
async fn drive_stream<S, E>(
    byte_stream: S,
    tool_ids: &ToolIdMap,
    handler: &mut dyn StreamHandler,
    cancel: &CancellationToken,
) -> ProviderResult<()>
where
    S: Stream<Item = Result<Bytes, E>> + Send + Unpin + 'static,
    E: Send + 'static,
    ProviderError: From<E>,
{
    // The decoder owns a clone of the token and stops requesting chunks the
    // moment it fires; a cancelled decoder ends without yielding
    let mut frames = Box::pin(parse_sse_frames(byte_stream, cancel.clone()));
    let mut state = StreamState::new();

    loop {
        if cancel.is_cancelled() {
            debug!("stream cancelled at chunk boundary");
            return Err(ProviderError::Cancelled);
        }

        match frames.next().await {
            Some(Ok(SseFrame::Data(payload))) => {
                let Some(delta) = extract_delta(&payload) else {
                    continue;
                };
                if let Some(text) = process_delta(delta, &mut state) {
                    handler.on_text(&text);
                }
            }
            Some(Ok(SseFrame::Done)) => break,
            None => {
                // Tell a cancelled decoder apart from natural exhaustion
                if cancel.is_cancelled() {
                    return Err(ProviderError::Cancelled);
                }
                break;
            }
            Some(Err(e)) => return Err(ProviderError::from(e)),
        }
    }

    let calls = finalize(state, tool_ids)?;
    debug!(tool_calls = calls.len(), "stream finished");
    for call in calls {
        handler.on_tool_call(call);
    }
    Ok(())
}

/// Parse an API error response body.
fn parse_api_error(body: &str, status: u16) -> (String, Option<String>) {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &json["error"];
        let message = error["message"]
            .as_str()
            .unwrap_or("Unknown error")
            .to_string();
        let code = error["type"].as_str().map(String::from);
        (message, code)
    } else {
        (format!("HTTP {status}: {body}"), None)
    }
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn stream_text(
        &self,
        context: &Context,
        options: &ProviderStreamOptions,
        handler: &mut dyn StreamHandler,
        cancel: &CancellationToken,
    ) -> ProviderResult<()> {
        self.stream_internal(context, options, handler, cancel).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
