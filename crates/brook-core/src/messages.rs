//! Message types for the brook conversation model.
//!
//! Messages form the conversation history handed to providers. Three roles:
//! system, user, and assistant. Tool results ride along inside assistant
//! tool-call blocks rather than as a separate role; providers expand them
//! into their own wire shapes.

use serde::{Deserialize, Serialize};

use crate::content::{AssistantContent, UserContent};
use crate::tools::Tool;

// ─────────────────────────────────────────────────────────────────────────────
// Message
// ─────────────────────────────────────────────────────────────────────────────

/// A single conversation message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum Message {
    /// System instructions. Content must be text-only; providers reject
    /// anything else at conversion time.
    #[serde(rename = "system")]
    System {
        /// Message content.
        content: Vec<UserContent>,
    },
    /// User message.
    #[serde(rename = "user")]
    User {
        /// Message content.
        content: Vec<UserContent>,
    },
    /// Assistant message.
    #[serde(rename = "assistant")]
    Assistant {
        /// Content blocks.
        content: Vec<AssistantContent>,
    },
}

impl Message {
    /// Create a system message from a single text block.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::System {
            content: vec![UserContent::text(text)],
        }
    }

    /// Create a user message from a single text block.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: vec![UserContent::text(text)],
        }
    }

    /// Create an assistant message from a single text block.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            content: vec![AssistantContent::text(text)],
        }
    }

    /// Returns `true` for assistant messages.
    #[must_use]
    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a provider needs to issue one completion request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// Available tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

impl Context {
    /// Create a context from messages, with no tools.
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: None,
        }
    }

    /// Attach tools to this context.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_role_tags() {
        let m = Message::user("hi");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["text"], "hi");

        let m = Message::assistant("hello");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["role"], "assistant");

        let m = Message::system("be brief");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["role"], "system");
    }

    #[test]
    fn message_serde_roundtrip() {
        let messages = vec![
            Message::system("be brief"),
            Message::user("what's the weather"),
            Message::assistant("checking"),
        ];
        let json = serde_json::to_string(&messages).unwrap();
        let back: Vec<Message> = serde_json::from_str(&json).unwrap();
        assert_eq!(messages, back);
    }

    #[test]
    fn is_assistant_guard() {
        assert!(Message::assistant("a").is_assistant());
        assert!(!Message::user("u").is_assistant());
    }

    #[test]
    fn context_without_tools_omits_field() {
        let ctx = Context::new(vec![Message::user("hi")]);
        let json = serde_json::to_value(&ctx).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn context_with_tools() {
        let ctx = Context::new(vec![Message::user("hi")]).with_tools(vec![Tool::new(
            "weather/current",
            "Current weather",
            crate::tools::ToolParameterSchema::empty_object(),
        )]);
        assert_eq!(ctx.tools.as_ref().map(Vec::len), Some(1));
    }
}
