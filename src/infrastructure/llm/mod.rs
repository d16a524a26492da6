//! LLM backend implementations

mod client;
mod openai;

pub use client::{LlmClient, COMPLETION_FAILURE_MESSAGE};
pub use openai::OpenAiChatProvider;
