//! # Provider Trait
//!
//! Core abstraction for streaming chat-completion backends. A provider drives
//! one request end to end: it sends the conversation, feeds decoded text
//! fragments to the caller's [`StreamHandler`] as they arrive, and delivers
//! reconstructed tool calls only once the stream has finished cleanly.

use async_trait::async_trait;
use brook_core::messages::Context;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::ProviderResult;
use crate::tool_id::ResolvedToolCall;

/// Callbacks invoked while a stream is consumed.
///
/// `on_text` fires immediately for each text fragment, in arrival order.
/// `on_tool_call` fires only after the stream ends, once per completed call
/// in slot order — if the stream fails, it is never invoked at all.
pub trait StreamHandler: Send {
    /// A text fragment arrived.
    fn on_text(&mut self, fragment: &str);

    /// A complete tool call was reconstructed after stream end.
    fn on_tool_call(&mut self, call: ResolvedToolCall);
}

/// Core streaming provider trait.
///
/// Implementors must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Current model ID (e.g. `"gpt-4o-mini"`).
    fn model(&self) -> &str;

    /// Stream one completion for `context`.
    ///
    /// Runs until the stream finishes, fails, or `cancel` is observed at a
    /// chunk boundary. Returns `Ok(())` only when the stream completed and
    /// every pending tool call was delivered to `handler`.
    async fn stream_text(
        &self,
        context: &Context,
        options: &ProviderStreamOptions,
        handler: &mut dyn StreamHandler,
        cancel: &CancellationToken,
    ) -> ProviderResult<()>;
}

/// Options for a provider stream request.
///
/// All fields are optional — providers use API defaults when not specified.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStreamOptions {
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 - 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Top-p sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_is_object_safe() {
        fn assert_object_safe(_: &dyn Provider) {}
        let _ = assert_object_safe;
    }

    #[test]
    fn stream_handler_is_object_safe() {
        fn assert_object_safe(_: &mut dyn StreamHandler) {}
        let _ = assert_object_safe;
    }

    #[test]
    fn provider_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Provider>();
    }

    #[test]
    fn stream_options_defaults() {
        let opts = ProviderStreamOptions::default();
        assert!(opts.max_tokens.is_none());
        assert!(opts.temperature.is_none());
        assert!(opts.top_p.is_none());
        assert!(opts.stop_sequences.is_none());
    }

    #[test]
    fn stream_options_skip_none_fields() {
        let opts = ProviderStreamOptions {
            max_tokens: Some(1000),
            ..Default::default()
        };
        let json = serde_json::to_value(&opts).unwrap();
        assert!(json.get("maxTokens").is_some());
        assert!(json.get("temperature").is_none());
        assert!(json.get("stopSequences").is_none());
    }

    #[test]
    fn stream_options_serde_roundtrip() {
        let opts = ProviderStreamOptions {
            max_tokens: Some(4096),
            temperature: Some(0.7),
            top_p: Some(0.9),
            stop_sequences: Some(vec!["END".into()]),
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: ProviderStreamOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_tokens, Some(4096));
        assert_eq!(back.temperature, Some(0.7));
        assert_eq!(back.top_p, Some(0.9));
        assert_eq!(back.stop_sequences, Some(vec!["END".into()]));
    }
}
