//! Conversion from conversation messages to the chat-completions wire format.
//!
//! The chat API has no structured tool-outcome shape: an assistant turn that
//! called tools becomes one `assistant` message listing the calls, followed
//! by one `tool` message per call carrying the recorded result. Tool names
//! are sanitized on the way out; the stream echoes the sanitized form back.

use brook_core::content::{AssistantContent, ToolCallOutcome, UserContent};
use brook_core::messages::Message;
use brook_core::tools::Tool;
use brook_llm::error::{ProviderError, ProviderResult};
use brook_llm::tool_id::sanitize_tool_id;

use crate::types::{
    ContentPart, ImageUrl, ToolErrorFormat, WireFunction, WireFunctionCall, WireMessage,
    WireTool, WireToolCall,
};

/// Convert conversation messages to wire messages.
///
/// Fails with [`ProviderError::InvalidMessage`] if a system message carries
/// non-text content, since the wire format only accepts plain text there.
pub fn convert_messages(
    messages: &[Message],
    error_format: &ToolErrorFormat,
) -> ProviderResult<Vec<WireMessage>> {
    let mut wire = Vec::with_capacity(messages.len());
    for message in messages {
        match message {
            Message::System { content } => wire.push(convert_system(content)?),
            Message::User { content } => wire.push(WireMessage::User {
                content: content.iter().map(convert_user_part).collect(),
            }),
            Message::Assistant { content } => {
                convert_assistant(content, error_format, &mut wire)?;
            }
        }
    }
    Ok(wire)
}

fn convert_system(content: &[UserContent]) -> ProviderResult<WireMessage> {
    let mut parts = Vec::with_capacity(content.len());
    for block in content {
        match block.as_text() {
            Some(text) => parts.push(text),
            None => {
                return Err(ProviderError::InvalidMessage {
                    message: "system messages only support text content".into(),
                });
            }
        }
    }
    Ok(WireMessage::System {
        content: parts.join("\n"),
    })
}

fn convert_user_part(block: &UserContent) -> ContentPart {
    match block {
        UserContent::Text { text } => ContentPart::Text { text: text.clone() },
        UserContent::Image { url } => ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.clone() },
        },
    }
}

/// Expand one assistant turn into an `assistant` wire message plus one
/// `tool` message per recorded tool call.
fn convert_assistant(
    content: &[AssistantContent],
    error_format: &ToolErrorFormat,
    wire: &mut Vec<WireMessage>,
) -> ProviderResult<()> {
    let mut text_parts = Vec::new();
    let mut tool_calls = Vec::new();
    let mut results = Vec::new();

    for block in content {
        match block {
            AssistantContent::Text { text } => text_parts.push(text.as_str()),
            AssistantContent::ToolCall {
                id,
                tool_id,
                arguments,
                outcome,
            } => {
                tool_calls.push(WireToolCall {
                    id: id.clone(),
                    call_type: "function".into(),
                    function: WireFunctionCall {
                        name: sanitize_tool_id(tool_id),
                        arguments: serde_json::to_string(arguments)?,
                    },
                });
                results.push(WireMessage::Tool {
                    tool_call_id: id.clone(),
                    content: match outcome {
                        ToolCallOutcome::Success { result } => result.clone(),
                        ToolCallOutcome::Error { error } => {
                            error_format.render(error.as_deref())
                        }
                    },
                });
            }
        }
    }

    let text = text_parts.join("\n");
    wire.push(WireMessage::Assistant {
        content: if text.is_empty() { None } else { Some(text) },
        tool_calls: if tool_calls.is_empty() {
            None
        } else {
            Some(tool_calls)
        },
    });
    wire.extend(results);
    Ok(())
}

/// Convert tool definitions to wire tools with sanitized names.
pub fn convert_tools(tools: &[Tool]) -> ProviderResult<Vec<WireTool>> {
    tools
        .iter()
        .map(|tool| {
            Ok(WireTool {
                tool_type: "function".into(),
                function: WireFunction {
                    name: sanitize_tool_id(&tool.id),
                    description: tool.description.clone(),
                    parameters: serde_json::to_value(&tool.parameters)?,
                },
            })
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use brook_core::tools::ToolParameterSchema;
    use serde_json::json;

    fn format() -> ToolErrorFormat {
        ToolErrorFormat::default()
    }

    // ── system messages ──────────────────────────────────────────────────

    #[test]
    fn system_text_blocks_are_joined() {
        let messages = vec![Message::System {
            content: vec![UserContent::text("be brief"), UserContent::text("be kind")],
        }];
        let wire = convert_messages(&messages, &format()).unwrap();
        assert_eq!(
            wire,
            vec![WireMessage::System {
                content: "be brief\nbe kind".into()
            }]
        );
    }

    #[test]
    fn system_image_is_rejected() {
        let messages = vec![Message::System {
            content: vec![UserContent::image("https://example.com/a.png")],
        }];
        let err = convert_messages(&messages, &format()).unwrap_err();
        assert_matches!(err, ProviderError::InvalidMessage { .. });
    }

    // ── user messages ────────────────────────────────────────────────────

    #[test]
    fn user_text_and_image_parts() {
        let messages = vec![Message::User {
            content: vec![
                UserContent::text("look at this"),
                UserContent::image("https://example.com/cat.png"),
            ],
        }];
        let wire = convert_messages(&messages, &format()).unwrap();
        let WireMessage::User { content } = &wire[0] else {
            panic!("expected user message");
        };
        assert_eq!(content.len(), 2);
        assert_eq!(
            content[1],
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "https://example.com/cat.png".into()
                }
            }
        );
    }

    // ── assistant messages ───────────────────────────────────────────────

    #[test]
    fn assistant_text_only() {
        let messages = vec![Message::assistant("hello")];
        let wire = convert_messages(&messages, &format()).unwrap();
        assert_eq!(
            wire,
            vec![WireMessage::Assistant {
                content: Some("hello".into()),
                tool_calls: None,
            }]
        );
    }

    #[test]
    fn assistant_tool_call_expands_to_two_messages() {
        let mut args = serde_json::Map::new();
        let _ = args.insert("city".into(), json!("Oslo"));
        let messages = vec![Message::Assistant {
            content: vec![AssistantContent::ToolCall {
                id: "call_1".into(),
                tool_id: "weather/current".into(),
                arguments: args,
                outcome: ToolCallOutcome::Success {
                    result: "4 degrees".into(),
                },
            }],
        }];
        let wire = convert_messages(&messages, &format()).unwrap();
        assert_eq!(wire.len(), 2);
        assert_eq!(
            wire[0],
            WireMessage::Assistant {
                content: None,
                tool_calls: Some(vec![WireToolCall {
                    id: "call_1".into(),
                    call_type: "function".into(),
                    function: WireFunctionCall {
                        name: "weathercurrent".into(),
                        arguments: "{\"city\":\"Oslo\"}".into(),
                    },
                }]),
            }
        );
        assert_eq!(
            wire[1],
            WireMessage::Tool {
                tool_call_id: "call_1".into(),
                content: "4 degrees".into(),
            }
        );
    }

    #[test]
    fn assistant_text_and_tool_call_keeps_text() {
        let messages = vec![Message::Assistant {
            content: vec![
                AssistantContent::text("checking the weather"),
                AssistantContent::ToolCall {
                    id: "call_1".into(),
                    tool_id: "weather/current".into(),
                    arguments: serde_json::Map::new(),
                    outcome: ToolCallOutcome::Success { result: "ok".into() },
                },
            ],
        }];
        let wire = convert_messages(&messages, &format()).unwrap();
        let WireMessage::Assistant { content, .. } = &wire[0] else {
            panic!("expected assistant message");
        };
        assert_eq!(content.as_deref(), Some("checking the weather"));
    }

    #[test]
    fn failed_tool_call_uses_error_text() {
        let messages = vec![Message::Assistant {
            content: vec![AssistantContent::ToolCall {
                id: "call_1".into(),
                tool_id: "search".into(),
                arguments: serde_json::Map::new(),
                outcome: ToolCallOutcome::Error {
                    error: Some("timed out".into()),
                },
            }],
        }];
        let wire = convert_messages(&messages, &format()).unwrap();
        assert_eq!(
            wire[1],
            WireMessage::Tool {
                tool_call_id: "call_1".into(),
                content: "timed out".into(),
            }
        );
    }

    #[test]
    fn failed_tool_call_without_error_uses_fallback() {
        let messages = vec![Message::Assistant {
            content: vec![AssistantContent::ToolCall {
                id: "call_1".into(),
                tool_id: "search".into(),
                arguments: serde_json::Map::new(),
                outcome: ToolCallOutcome::Error { error: None },
            }],
        }];
        let wire = convert_messages(&messages, &format()).unwrap();
        assert_eq!(
            wire[1],
            WireMessage::Tool {
                tool_call_id: "call_1".into(),
                content: crate::types::UNKNOWN_TOOL_ERROR.into(),
            }
        );
    }

    #[test]
    fn error_prefix_is_applied() {
        let format = ToolErrorFormat {
            prefix: Some("Error: ".into()),
        };
        let messages = vec![Message::Assistant {
            content: vec![AssistantContent::ToolCall {
                id: "call_1".into(),
                tool_id: "search".into(),
                arguments: serde_json::Map::new(),
                outcome: ToolCallOutcome::Error {
                    error: Some("timed out".into()),
                },
            }],
        }];
        let wire = convert_messages(&messages, &format).unwrap();
        assert_eq!(
            wire[1],
            WireMessage::Tool {
                tool_call_id: "call_1".into(),
                content: "Error: timed out".into(),
            }
        );
    }

    // ── convert_tools ────────────────────────────────────────────────────

    #[test]
    fn tools_get_sanitized_names() {
        let tools = vec![Tool::new(
            "weather/current",
            "Current weather",
            ToolParameterSchema::empty_object(),
        )];
        let wire = convert_tools(&tools).unwrap();
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].tool_type, "function");
        assert_eq!(wire[0].function.name, "weathercurrent");
        assert_eq!(wire[0].function.parameters["type"], "object");
    }
}
