//! Grading Assistant
//!
//! LLM-assisted grading of free-text student submissions with support for:
//! - Boundary-aware chunking and embedding of reference solutions
//! - Nearest-neighbor retrieval over stored solutions (RAG)
//! - Structured score/rationale/feedback extraction from model replies
//! - Graceful degradation when embedding or completion backends are down

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use config::EmbeddingBackend;
use domain::embedding::EmbeddingProvider;
use domain::index::VectorIndexProvider;
use infrastructure::embedding::{
    HashEmbeddingProvider, OpenAiEmbeddingProvider, ResilientEmbeddingProvider,
};
use infrastructure::http_client::HttpClient;
use infrastructure::index::QdrantVectorIndex;
use infrastructure::ingestion::BoundaryChunker;
use infrastructure::llm::{LlmClient, OpenAiChatProvider};
use infrastructure::services::RetrievalService;

/// Build the configured embedding provider, wrapped for graceful degradation
pub fn build_embedding_provider(config: &AppConfig) -> Arc<dyn EmbeddingProvider> {
    let dimensions = config.embedding.dimensions;

    match config.embedding.backend {
        EmbeddingBackend::Local => Arc::new(ResilientEmbeddingProvider::new(
            HashEmbeddingProvider::new(dimensions),
        )),
        EmbeddingBackend::Remote => {
            let client = HttpClient::with_timeout(Duration::from_secs(config.llm.timeout_secs));
            let provider = OpenAiEmbeddingProvider::with_base_url(
                client,
                config.embedding.api_key.clone(),
                &config.embedding.base_url,
                dimensions,
            );

            Arc::new(ResilientEmbeddingProvider::new(provider))
        }
    }
}

/// Build the configured vector index backend
pub fn build_vector_index(config: &AppConfig) -> Arc<dyn VectorIndexProvider> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.llm.timeout_secs));

    Arc::new(QdrantVectorIndex::with_base_url(
        client,
        config.vector.api_key.clone(),
        &config.vector.url,
        config.embedding.dimensions,
    ))
}

/// Build the completion client with the configured model and endpoint
pub fn build_llm_client(config: &AppConfig) -> Arc<LlmClient> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.llm.timeout_secs));
    let provider =
        OpenAiChatProvider::with_base_url(client, config.llm.api_key.clone(), &config.llm.base_url);

    Arc::new(LlmClient::new(Arc::new(provider), &config.llm.model))
}

/// Build the retrieval service over the configured backends
pub fn build_retrieval_service(
    config: &AppConfig,
    embedding: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
) -> Arc<RetrievalService> {
    Arc::new(RetrievalService::new(
        embedding,
        index,
        Arc::new(BoundaryChunker::new()),
        &config.vector.collection,
        &config.embedding.model,
    ))
}
