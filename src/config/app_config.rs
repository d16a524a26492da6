use serde::Deserialize;

use crate::domain::ingestion::ChunkingConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub vector: VectorConfig,
    pub chunking: ChunkingConfig,
    pub logging: LoggingConfig,
}

/// Completion backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            // LM Studio default endpoint
            base_url: "http://localhost:1234".to_string(),
            api_key: None,
            model: "local-model".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Which embedding backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// OpenAI-style HTTP endpoint (hosted or local inference server)
    #[default]
    Remote,
    /// In-process feature-hashing embeddings, no network
    Local,
}

/// Embedding backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            base_url: "http://localhost:1234".to_string(),
            api_key: None,
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimensions: 1536,
        }
    }
}

/// Vector index settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6333".to_string(),
            api_key: None,
            collection: "solution_embeddings".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("GRADER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();

        assert_eq!(config.llm.base_url, "http://localhost:1234");
        assert_eq!(config.vector.url, "http://localhost:6333");
        assert_eq!(config.vector.collection, "solution_embeddings");
        assert_eq!(config.embedding.dimensions, 1536);
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_embedding_backend_deserialization() {
        let backend: EmbeddingBackend = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(backend, EmbeddingBackend::Local);

        let backend: EmbeddingBackend = serde_json::from_str("\"remote\"").unwrap();
        assert_eq!(backend, EmbeddingBackend::Remote);
    }

    #[test]
    fn test_section_deserialization_with_partial_fields() {
        let config: AppConfig = serde_json::from_str(
            r#"{"embedding": {"backend": "local", "dimensions": 384}}"#,
        )
        .unwrap();

        assert_eq!(config.embedding.backend, EmbeddingBackend::Local);
        assert_eq!(config.embedding.dimensions, 384);
        // untouched sections keep their defaults
        assert_eq!(config.vector.collection, "solution_embeddings");
    }
}
