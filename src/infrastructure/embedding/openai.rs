//! OpenAI-compatible embedding backend
//!
//! LM Studio and similar local inference servers expose the same
//! `/v1/embeddings` shape, so this provider covers both the hosted and the
//! local-server case.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::embedding::{
    Embedding, EmbeddingInput, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_BASE_URL: &str = "http://localhost:1234";

/// Embedding provider speaking the OpenAI embeddings API
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: Option<String>,
    base_url: String,
    dimensions: usize,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    /// Provider against the default local inference server
    pub fn new(client: C, api_key: Option<String>, dimensions: usize) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL, dimensions)
    }

    /// Provider with a custom base URL
    pub fn with_base_url(
        client: C,
        api_key: Option<String>,
        base_url: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        let auth_header = api_key
            .filter(|key| !key.is_empty())
            .map(|key| format!("Bearer {}", key));
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            dimensions,
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];

        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }

        headers
    }

    fn build_request(&self, request: &EmbeddingRequest) -> serde_json::Value {
        let input = match request.input() {
            EmbeddingInput::Single(text) => serde_json::json!(text),
            EmbeddingInput::Batch(texts) => serde_json::json!(texts),
        };

        let mut body = serde_json::json!({
            "model": request.model(),
            "input": input,
        });

        if let Some(dimensions) = request.dimensions() {
            body["dimensions"] = serde_json::json!(dimensions);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<EmbeddingResponse, DomainError> {
        let response: ApiEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        let embeddings: Vec<Embedding> = response
            .data
            .into_iter()
            .map(|d| Embedding::new(d.index, d.embedding))
            .collect();

        let usage = response
            .usage
            .map(|u| EmbeddingUsage::new(u.prompt_tokens, u.total_tokens))
            .unwrap_or_default();

        Ok(EmbeddingResponse::new(response.model, embeddings, usage))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let url = self.embeddings_url();
        let body = self.build_request(&request);

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// Wire types for the embeddings endpoint

#[derive(Debug, Serialize, Deserialize)]
struct ApiEmbeddingResponse {
    #[serde(default)]
    model: String,
    data: Vec<ApiEmbeddingData>,
    usage: Option<ApiEmbeddingUsage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiEmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}
