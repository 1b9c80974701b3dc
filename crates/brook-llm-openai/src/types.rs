//! Configuration and wire types for the chat-completions API.
//!
//! Request types serialize to the `/chat/completions` JSON body; chunk types
//! deserialize the per-frame payloads of a streaming response. Unknown fields
//! in incoming chunks are ignored so the decoder tolerates provider
//! extensions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Fallback for failed tool calls that carried no error description.
pub const UNKNOWN_TOOL_ERROR: &str = "An unknown error occurred";

/// How failed tool results are rendered into `tool` messages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolErrorFormat {
    /// Optional prefix prepended to the error text (e.g. `"Error: "`).
    /// No prefix by default; the raw error text is forwarded as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl ToolErrorFormat {
    /// Render a recorded tool error into result-message content.
    #[must_use]
    pub fn render(&self, error: Option<&str>) -> String {
        let text = error.unwrap_or(UNKNOWN_TOOL_ERROR);
        match &self.prefix {
            Some(prefix) => format!("{prefix}{text}"),
            None => text.to_string(),
        }
    }
}

/// Configuration for an OpenAI-compatible provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAiCompatibleConfig {
    /// Model ID sent with every request.
    pub model: String,
    /// Base URL of the API (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// Bearer token. Local endpoints often need none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Rendering policy for failed tool results.
    #[serde(default, skip_serializing_if = "is_default_error_format")]
    pub tool_error_format: ToolErrorFormat,
}

fn is_default_error_format(format: &ToolErrorFormat) -> bool {
    *format == ToolErrorFormat::default()
}

impl OpenAiCompatibleConfig {
    /// Create a config with no API key and default error formatting.
    #[must_use]
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into(),
            api_key: None,
            tool_error_format: ToolErrorFormat::default(),
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request wire types
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level `/chat/completions` request body.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    /// Model ID.
    pub model: String,
    /// Converted conversation messages.
    pub messages: Vec<WireMessage>,
    /// Tool definitions, omitted when the caller registered none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    /// Always `true`; this provider only streams.
    pub stream: bool,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Top-p sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

/// One message in the request body, discriminated by role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum WireMessage {
    /// System instructions (plain text on the wire).
    System {
        /// Concatenated instruction text.
        content: String,
    },
    /// User message with structured content parts.
    User {
        /// Content parts.
        content: Vec<ContentPart>,
    },
    /// Assistant message, possibly carrying tool calls.
    Assistant {
        /// Text content; `null` when the turn was tool calls only.
        content: Option<String>,
        /// Tool calls made in this turn.
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<WireToolCall>>,
    },
    /// Result of one tool call, echoed back by its call ID.
    Tool {
        /// ID of the call this result answers.
        tool_call_id: String,
        /// Result text.
        content: String,
    },
}

/// A content part inside a user message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
    /// Image reference.
    ImageUrl {
        /// Wrapped URL object, per the chat API shape.
        image_url: ImageUrl,
    },
}

/// URL wrapper for image content parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Image URL (https or data URI).
    pub url: String,
}

/// A tool call replayed in assistant history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    /// Call ID.
    pub id: String,
    /// Always `"function"`.
    #[serde(rename = "type")]
    pub call_type: String,
    /// The invoked function.
    pub function: WireFunctionCall,
}

/// Function name + arguments inside a replayed tool call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    /// Sanitized tool name.
    pub name: String,
    /// Arguments, JSON-encoded as a string per the chat API.
    pub arguments: String,
}

/// A tool definition in the request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireTool {
    /// Always `"function"`.
    #[serde(rename = "type")]
    pub tool_type: String,
    /// The function definition.
    pub function: WireFunction,
}

/// Function definition inside a tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    /// Sanitized tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the parameters.
    pub parameters: Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming chunk wire types
// ─────────────────────────────────────────────────────────────────────────────

/// One parsed streaming chunk (the JSON payload of a `data:` frame).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatCompletionChunk {
    /// Choice list; only the first choice is consumed.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

/// One choice inside a chunk.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChunkChoice {
    /// The incremental delta, absent on e.g. final usage chunks.
    #[serde(default)]
    pub delta: Option<ChatDelta>,
}

/// Incremental content carried by one chunk.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatDelta {
    /// Text fragment.
    #[serde(default)]
    pub content: Option<String>,
    /// Tool-call fragments, addressed by slot index.
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallFragment>>,
}

/// One tool-call fragment inside a delta.
#[derive(Clone, Debug, Deserialize)]
pub struct ToolCallFragment {
    /// Slot index this fragment belongs to.
    pub index: usize,
    /// Call ID, usually present only on the slot's first fragment.
    #[serde(default)]
    pub id: Option<String>,
    /// Function name/argument pieces.
    #[serde(default)]
    pub function: Option<FunctionFragment>,
}

/// Partial function data inside a tool-call fragment.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FunctionFragment {
    /// Name piece; appended across fragments.
    #[serde(default)]
    pub name: Option<String>,
    /// Argument text piece; appended across fragments.
    #[serde(default)]
    pub arguments: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
