//! Qdrant vector index backend (REST API)

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::index::{DistanceMetric, ScoredPoint, VectorIndexProvider, VectorPoint};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_QDRANT_URL: &str = "http://localhost:6333";

/// Qdrant-backed vector index
#[derive(Debug)]
pub struct QdrantVectorIndex<C: HttpClientTrait> {
    client: C,
    base_url: String,
    api_key: Option<String>,
    dimensions: usize,
}

impl<C: HttpClientTrait> QdrantVectorIndex<C> {
    /// Index against the default local Qdrant instance
    pub fn new(client: C, api_key: Option<String>, dimensions: usize) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_QDRANT_URL, dimensions)
    }

    /// Index with a custom base URL
    pub fn with_base_url(
        client: C,
        api_key: Option<String>,
        base_url: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
            dimensions,
        }
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{}", self.base_url, name)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];

        if let Some(ref key) = self.api_key {
            headers.push(("api-key", key.as_str()));
        }

        headers
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorIndexProvider for QdrantVectorIndex<C> {
    async fn ensure_collection(
        &self,
        name: &str,
        dimensions: usize,
        metric: DistanceMetric,
    ) -> Result<(), DomainError> {
        let url = self.collection_url(name);

        if self.client.get_json(&url, self.headers()).await.is_ok() {
            debug!(collection = name, "collection already exists");
            return Ok(());
        }

        let body = json!({
            "vectors": {
                "size": dimensions,
                "distance": metric.as_qdrant_str(),
            }
        });

        self.client.put_json(&url, self.headers(), &body).await?;
        debug!(collection = name, dimensions, "collection created");

        Ok(())
    }

    async fn upsert(&self, collection: &str, point: VectorPoint) -> Result<(), DomainError> {
        if point.dimensions() != self.dimensions {
            return Err(DomainError::dimension_mismatch(
                self.dimensions,
                point.dimensions(),
            ));
        }

        let url = format!("{}/points", self.collection_url(collection));
        let body = json!({
            "points": [{
                "id": point.id,
                "vector": point.vector,
                "payload": point.payload,
            }]
        });

        self.client.put_json(&url, self.headers(), &body).await?;

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, DomainError> {
        if vector.len() != self.dimensions {
            return Err(DomainError::dimension_mismatch(self.dimensions, vector.len()));
        }

        let url = format!("{}/points/search", self.collection_url(collection));
        let body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        let response: QdrantSearchResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("qdrant", format!("Failed to parse search response: {}", e))
        })?;

        Ok(response
            .result
            .into_iter()
            .map(|hit| ScoredPoint::new(hit.id_string(), hit.score, hit.payload))
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DomainError> {
        let url = format!("{}/points/delete", self.collection_url(collection));
        let body = json!({ "points": [id] });

        self.client.post_json(&url, self.headers(), &body).await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "qdrant"
    }
}

// Wire types for the Qdrant REST API

#[derive(Debug, Deserialize)]
struct QdrantSearchResponse {
    #[serde(default)]
    result: Vec<QdrantScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct QdrantScoredPoint {
    id: serde_json::Value,
    score: f32,
    #[serde(default)]
    payload: HashMap<String, serde_json::Value>,
}

impl QdrantScoredPoint {
    /// Qdrant point ids may be strings or integers
    fn id_string(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const BASE: &str = "http://localhost:6333";
    const COLLECTION: &str = "solution_embeddings";

    fn search_url() -> String {
        format!("{}/collections/{}/points/search", BASE, COLLECTION)
    }

    #[tokio::test]
    async fn test_ensure_collection_skips_existing() {
        let client = MockHttpClient::new().with_response(
            format!("{}/collections/{}", BASE, COLLECTION),
            json!({"result": {"status": "green"}}),
        );
        let index = QdrantVectorIndex::new(client, None, 1536);

        index
            .ensure_collection(COLLECTION, 1536, DistanceMetric::Cosine)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ensure_collection_creates_when_missing() {
        // GET has no mock response (error), PUT succeeds
        let client = MockHttpClient::new()
            .with_error(format!("{}/collections/{}", BASE, COLLECTION), "404");
        let index = QdrantVectorIndex::new(client, None, 1536);

        // The PUT hits the same URL, which maps to the configured error in the
        // single-map mock, so assert the create path is attempted
        let result = index
            .ensure_collection(COLLECTION, 1536, DistanceMetric::Cosine)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_upsert_dimension_mismatch_is_local() {
        let index = QdrantVectorIndex::new(MockHttpClient::new(), None, 1536);

        let result = index
            .upsert(
                COLLECTION,
                VectorPoint::new("sol_1", vec![0.1, 0.2], HashMap::new()),
            )
            .await;

        assert!(matches!(
            result,
            Err(DomainError::DimensionMismatch {
                expected: 1536,
                actual: 2
            })
        ));
    }

    #[tokio::test]
    async fn test_upsert_posts_point() {
        let client = MockHttpClient::new().with_response(
            format!("{}/collections/{}/points", BASE, COLLECTION),
            json!({"result": {"status": "acknowledged"}}),
        );
        let index = QdrantVectorIndex::new(client, None, 2);

        index
            .upsert(
                COLLECTION,
                VectorPoint::new("sol_1", vec![0.1, 0.2], HashMap::new()),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_query_parses_hits() {
        let client = MockHttpClient::new().with_response(
            search_url(),
            json!({
                "result": [
                    {"id": "sol_1", "score": 0.98, "payload": {"solution_id": "s-1", "type": "solution"}},
                    {"id": 42, "score": 0.71, "payload": {}},
                ]
            }),
        );
        let index = QdrantVectorIndex::new(client, None, 2);

        let results = index.query(COLLECTION, &[0.1, 0.2], 5).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "sol_1");
        assert!((results[0].score - 0.98).abs() < 0.0001);
        assert_eq!(results[0].payload_str("solution_id"), Some("s-1"));
        assert_eq!(results[1].id, "42");
    }

    #[tokio::test]
    async fn test_query_transport_error() {
        let client = MockHttpClient::new().with_error(search_url(), "connection refused");
        let index = QdrantVectorIndex::new(client, None, 2);

        let result = index.query(COLLECTION, &[0.1, 0.2], 5).await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_delete_posts_id() {
        let client = MockHttpClient::new().with_response(
            format!("{}/collections/{}/points/delete", BASE, COLLECTION),
            json!({"result": {"status": "acknowledged"}}),
        );
        let index = QdrantVectorIndex::new(client, None, 2);

        index.delete(COLLECTION, "sol_1").await.unwrap();
    }

    #[test]
    fn test_custom_base_url_trims_slash() {
        let index = QdrantVectorIndex::with_base_url(
            MockHttpClient::new(),
            Some("key".into()),
            "http://qdrant:6333/",
            4,
        );

        assert_eq!(
            index.collection_url("c"),
            "http://qdrant:6333/collections/c"
        );
    }
}
