//! # brook-llm-openai
//!
//! OpenAI-compatible streaming provider implementation.
//!
//! Implements the [`Provider`](brook_llm::Provider) trait from `brook-llm`
//! for `/chat/completions` endpoints (`OpenAI`, Ollama, llama.cpp, vLLM, and
//! other compatible servers):
//!
//! - [`types`] — Configuration and request/chunk wire structures
//! - [`message_converter`] — Convert Context messages to the chat wire format
//! - [`stream_handler`] — Chunk deltas → text fragments and tool-call slots
//! - [`provider`] — `OpenAiCompatibleProvider` implementing the trait
//!
//! # Authentication
//!
//! Optional Bearer token; local endpoints typically run without one.
//!
//! # Tool calls
//!
//! Tool-call fragments are accumulated per slot index during the stream and
//! delivered as complete, resolved calls only after the stream ends cleanly.

#![deny(unsafe_code)]

pub mod message_converter;
pub mod provider;
pub mod stream_handler;
pub mod types;

pub use provider::OpenAiCompatibleProvider;
pub use types::{OpenAiCompatibleConfig, ToolErrorFormat};
