//! Retrieval service - stores solution embeddings and recalls similar ones

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::index::{DistanceMetric, ScoredPoint, VectorIndexProvider, VectorPoint};
use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy};
use crate::domain::DomainError;

/// Default number of candidates returned by similarity search
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Orchestrates chunking, embedding and the vector index
#[derive(Debug)]
pub struct RetrievalService {
    embedding: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
    chunker: Arc<dyn ChunkingStrategy>,
    collection: String,
    model: String,
}

impl RetrievalService {
    pub fn new(
        embedding: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
        chunker: Arc<dyn ChunkingStrategy>,
        collection: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            embedding,
            index,
            chunker,
            collection: collection.into(),
            model: model.into(),
        }
    }

    /// Create the backing collection if it does not exist yet
    pub async fn ensure_ready(&self) -> Result<(), DomainError> {
        self.index
            .ensure_collection(
                &self.collection,
                self.embedding.dimensions(),
                DistanceMetric::Cosine,
            )
            .await
    }

    /// Embed a whole solution text as one vector and store it
    ///
    /// Returns the generated vector identifier.
    pub async fn store_solution(
        &self,
        solution_id: &str,
        text: &str,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<String, DomainError> {
        let vector = self.embed_one(text).await?;
        let vector_id = format!("sol_{}", Uuid::new_v4());

        let mut payload = metadata;
        payload.insert("solution_id".to_string(), json!(solution_id));
        payload.insert("type".to_string(), json!("solution"));

        self.index
            .upsert(&self.collection, VectorPoint::new(&vector_id, vector, payload))
            .await?;

        info!(solution_id, vector_id = %vector_id, "stored solution embedding");

        Ok(vector_id)
    }

    /// Bulk-ingestion path for long solution texts
    ///
    /// Chunks the text, embeds each chunk and stores each under its own
    /// generated identifier with chunk position metadata. The caller decides
    /// when a text is long enough to go through here.
    pub async fn store_solution_chunks(
        &self,
        solution_id: &str,
        text: &str,
        config: &ChunkingConfig,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<Vec<String>, DomainError> {
        let chunks = self.chunker.chunk(text, config)?;
        let mut vector_ids = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            let vector = self.embed_one(&chunk.content).await?;
            let vector_id = format!("chunk_{}", Uuid::new_v4());

            let mut payload = metadata.clone();
            payload.extend(chunk.metadata.to_json_map());
            payload.insert("solution_id".to_string(), json!(solution_id));
            payload.insert("type".to_string(), json!("solution"));

            self.index
                .upsert(&self.collection, VectorPoint::new(&vector_id, vector, payload))
                .await?;

            vector_ids.push(vector_id);
        }

        info!(
            solution_id,
            chunks = vector_ids.len(),
            "stored chunked solution embeddings"
        );

        Ok(vector_ids)
    }

    /// Find stored records similar to the given text
    ///
    /// Returns an empty list (never an error) when the index is empty or a
    /// backend is unreachable; grading falls back to the direct path then.
    pub async fn find_similar(&self, text: &str, limit: usize) -> Vec<ScoredPoint> {
        let request = EmbeddingRequest::single(&self.model, text);

        let vector = match self.embedding.embed(request).await {
            Ok(response) => match response.first() {
                Some(embedding) => embedding.vector().to_vec(),
                None => return Vec::new(),
            },
            Err(error) => {
                warn!(%error, "query embedding failed, returning no candidates");
                return Vec::new();
            }
        };

        match self.index.query(&self.collection, &vector, limit).await {
            Ok(hits) => hits,
            Err(error) => {
                warn!(%error, "vector search failed, returning no candidates");
                Vec::new()
            }
        }
    }

    /// Remove a stored embedding record, used when its solution is deleted
    pub async fn delete_vector(&self, vector_id: &str) -> Result<(), DomainError> {
        self.index.delete(&self.collection, vector_id).await
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest::single(&self.model, text);
        let response = self.embedding.embed(request).await?;

        response
            .first()
            .map(|embedding| embedding.vector().to_vec())
            .ok_or_else(|| DomainError::internal("embedding backend returned no vectors"))
    }
}
