//! Completion client with bounded generation parameters
//!
//! Failures come back as a fixed human-readable string rather than an error:
//! the result parser must still run over whatever this returns, and on the
//! failure text it yields a zero score instead of crashing the attempt.

use std::sync::Arc;

use tracing::warn;

use crate::domain::llm::{LlmProvider, LlmRequest};

/// Reply substituted when the completion backend is unreachable
pub const COMPLETION_FAILURE_MESSAGE: &str =
    "ไม่สามารถเชื่อมต่อกับโมเดลตรวจข้อสอบได้ในขณะนี้ กรุณาลองใหม่ภายหลัง";

const TEMPERATURE: f32 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 2048;
const TOP_P: f32 = 0.95;

/// Single-turn completion client used by the grading orchestrator
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmClient {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system + user turn and return the reply text
    ///
    /// Never fails; transport errors degrade to the fixed failure message.
    pub async fn complete(&self, system_instruction: &str, prompt: &str) -> String {
        let request = LlmRequest::builder()
            .system(system_instruction)
            .user(prompt)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_OUTPUT_TOKENS)
            .top_p(TOP_P)
            .build();

        match self.provider.chat(&self.model, request).await {
            Ok(response) => response.content().to_string(),
            Err(error) => {
                warn!(
                    provider = self.provider.provider_name(),
                    model = %self.model,
                    %error,
                    "completion backend unavailable, substituting failure message"
                );

                COMPLETION_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
