//! # brook-core
//!
//! Foundation types for the brook streaming chat-completion client.
//!
//! This crate provides the shared vocabulary the provider crates depend on:
//!
//! - **Messages**: `Message` enum with `System`, `User`, `Assistant` variants
//! - **Content blocks**: `UserContent` and `AssistantContent`, including
//!   tool calls with recorded outcomes
//! - **Tools**: `Tool` definitions with JSON Schema parameters
//! - **Context**: the message history + tool set handed to a provider

#![deny(unsafe_code)]

pub mod content;
pub mod messages;
pub mod tools;

pub use content::{AssistantContent, ToolCallOutcome, UserContent};
pub use messages::{Context, Message};
pub use tools::{Tool, ToolParameterSchema};
