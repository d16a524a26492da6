//! OpenAI-compatible chat completion backend
//!
//! LM Studio exposes the same `/v1/chat/completions` shape, so this provider
//! works against both the hosted API and a local inference server.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, Usage};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_BASE_URL: &str = "http://localhost:1234";

/// Chat completion provider speaking the OpenAI API
#[derive(Debug)]
pub struct OpenAiChatProvider<C: HttpClientTrait> {
    client: C,
    auth_header: Option<String>,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiChatProvider<C> {
    /// Provider against the default local inference server
    pub fn new(client: C, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    /// Provider with a custom base URL
    pub fn with_base_url(
        client: C,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = api_key
            .filter(|key| !key.is_empty())
            .map(|key| format!("Bearer {}", key));

        Self {
            client,
            auth_header,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];

        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }

        headers
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(temperature) = request.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(top_p) = request.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }

        if let Some(ref stop) = request.stop {
            body["stop"] = serde_json::json!(stop);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: ApiChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response = llm_response
                .with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiChatProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Error,
    }
}

// Wire types for the chat completions endpoint

#[derive(Debug, Deserialize)]
struct ApiChatResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use serde_json::json;

    const TEST_URL: &str = "http://localhost:1234/v1/chat/completions";

    fn mock_response(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "model": "local-model",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 60, "total_tokens": 180}
        })
    }

    #[tokio::test]
    async fn test_chat_success() {
        let client =
            MockHttpClient::new().with_response(TEST_URL, mock_response("คะแนนที่ได้: 8"));
        let provider = OpenAiChatProvider::new(client, None);

        let request = LlmRequest::builder()
            .system("grader")
            .user("grade this")
            .temperature(0.1)
            .build();

        let response = provider.chat("local-model", request).await.unwrap();

        assert_eq!(response.content(), "คะแนนที่ได้: 8");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.as_ref().unwrap().total_tokens, 180);
    }

    #[tokio::test]
    async fn test_chat_transport_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection refused");
        let provider = OpenAiChatProvider::new(client, None);

        let request = LlmRequest::builder().user("grade this").build();

        assert!(provider.chat("local-model", request).await.is_err());
    }

    #[tokio::test]
    async fn test_chat_empty_choices() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({"id": "x", "model": "m", "choices": []}),
        );
        let provider = OpenAiChatProvider::new(client, None);

        let request = LlmRequest::builder().user("hi").build();

        assert!(provider.chat("local-model", request).await.is_err());
    }

    #[test]
    fn test_build_request_includes_sampling_params() {
        let provider = OpenAiChatProvider::new(MockHttpClient::new(), None);
        let request = LlmRequest::builder()
            .user("hi")
            .temperature(0.1)
            .max_tokens(2048)
            .top_p(0.95)
            .build();

        let body = provider.build_request("local-model", &request);

        assert_eq!(body["model"], json!("local-model"));
        assert_eq!(body["stream"], json!(false));
        assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 0.0001);
        assert_eq!(body["max_tokens"], json!(2048));
        assert!((body["top_p"].as_f64().unwrap() - 0.95).abs() < 0.0001);
    }

    #[test]
    fn test_parse_finish_reason() {
        assert_eq!(parse_finish_reason("stop"), FinishReason::Stop);
        assert_eq!(parse_finish_reason("length"), FinishReason::Length);
        assert_eq!(parse_finish_reason("banana"), FinishReason::Error);
    }
}
