//! Content block types.
//!
//! These are the primitive building blocks that appear inside messages.
//! Extracted as a standalone module so messages and tools can both reference
//! them without a circular dependency.

use serde::{Deserialize, Serialize};

/// Content that can appear in system and user messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserContent {
    /// Text content.
    #[serde(rename = "text")]
    Text {
        /// The text.
        text: String,
    },
    /// Image content, referenced by URL.
    #[serde(rename = "image")]
    Image {
        /// Image URL (https or data URI).
        url: String,
    },
}

/// Outcome of an executed tool call carried in conversation history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolCallOutcome {
    /// The tool ran to completion.
    Success {
        /// Tool output, as text.
        result: String,
    },
    /// The tool failed.
    Error {
        /// Failure description, if the tool produced one.
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// Content that can appear in assistant messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AssistantContent {
    /// Text content.
    #[serde(rename = "text")]
    Text {
        /// The text.
        text: String,
    },
    /// A tool call the assistant made, together with its recorded outcome.
    #[serde(rename = "tool_call")]
    ToolCall {
        /// Provider-assigned call ID.
        id: String,
        /// Tool ID as registered by the caller.
        #[serde(rename = "toolId")]
        tool_id: String,
        /// Tool arguments.
        arguments: serde_json::Map<String, serde_json::Value>,
        /// Execution outcome.
        #[serde(flatten)]
        outcome: ToolCallOutcome,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Convenience constructors
// ─────────────────────────────────────────────────────────────────────────────

impl UserContent {
    /// Create a text content block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image content block.
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self::Image { url: url.into() }
    }

    /// Returns `true` if this is text content.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Returns the text if this is a text block, `None` otherwise.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }
}

impl AssistantContent {
    /// Create a text content block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Returns `true` if this is a tool call block.
    #[must_use]
    pub fn is_tool_call(&self) -> bool {
        matches!(self, Self::ToolCall { .. })
    }

    /// Returns the text if this is a text block, `None` otherwise.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ToolCall { .. } => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extract text helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extract and join text from user content blocks.
pub fn extract_text_from_user_content(content: &[UserContent]) -> String {
    content
        .iter()
        .filter_map(UserContent::as_text)
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- UserContent --

    #[test]
    fn user_content_text_serde() {
        let uc = UserContent::text("hello");
        assert!(uc.is_text());
        assert_eq!(uc.as_text(), Some("hello"));
        let json = serde_json::to_value(&uc).unwrap();
        assert_eq!(json, json!({"type": "text", "text": "hello"}));
        let back: UserContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, uc);
    }

    #[test]
    fn user_content_image_serde() {
        let uc = UserContent::image("https://example.com/cat.png");
        assert!(!uc.is_text());
        assert_eq!(uc.as_text(), None);
        let json = serde_json::to_value(&uc).unwrap();
        assert_eq!(
            json,
            json!({"type": "image", "url": "https://example.com/cat.png"})
        );
    }

    // -- AssistantContent --

    #[test]
    fn assistant_content_text() {
        let ac = AssistantContent::text("response");
        assert!(!ac.is_tool_call());
        assert_eq!(ac.as_text(), Some("response"));
    }

    #[test]
    fn assistant_content_tool_call_serde() {
        let mut args = serde_json::Map::new();
        let _ = args.insert("city".into(), json!("Oslo"));
        let ac = AssistantContent::ToolCall {
            id: "call_1".into(),
            tool_id: "weather/current".into(),
            arguments: args,
            outcome: ToolCallOutcome::Success {
                result: "4 degrees".into(),
            },
        };
        let json = serde_json::to_value(&ac).unwrap();
        assert_eq!(json["type"], "tool_call");
        assert_eq!(json["toolId"], "weather/current");
        assert_eq!(json["status"], "success");
        assert_eq!(json["arguments"]["city"], "Oslo");
        let back: AssistantContent = serde_json::from_value(json).unwrap();
        assert_eq!(ac, back);
    }

    #[test]
    fn tool_call_outcome_error_without_message() {
        let outcome = ToolCallOutcome::Error { error: None };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, json!({"status": "error"}));
    }

    #[test]
    fn tool_call_outcome_error_with_message() {
        let outcome = ToolCallOutcome::Error {
            error: Some("timed out".into()),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, json!({"status": "error", "error": "timed out"}));
    }

    // -- extract_text helpers --

    #[test]
    fn extract_text_from_user_content_mixed() {
        let content = vec![
            UserContent::text("first"),
            UserContent::image("https://example.com/a.png"),
            UserContent::text("second"),
        ];
        assert_eq!(extract_text_from_user_content(&content), "first\nsecond");
    }

    #[test]
    fn extract_text_from_user_content_empty() {
        let content: Vec<UserContent> = vec![];
        assert_eq!(extract_text_from_user_content(&content), "");
    }
}
