//! In-memory vector index for development and testing

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::embedding::cosine_similarity;
use crate::domain::index::{DistanceMetric, ScoredPoint, VectorIndexProvider, VectorPoint};
use crate::domain::DomainError;

/// Exact-scan vector index held in memory
#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    collections: RwLock<HashMap<String, Collection>>,
}

#[derive(Debug)]
struct Collection {
    dimensions: usize,
    #[allow(dead_code)]
    metric: DistanceMetric,
    points: HashMap<String, VectorPoint>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorIndexProvider for InMemoryVectorIndex {
    async fn ensure_collection(
        &self,
        name: &str,
        dimensions: usize,
        metric: DistanceMetric,
    ) -> Result<(), DomainError> {
        let mut collections = self.collections.write().await;

        if let Some(existing) = collections.get(name) {
            if existing.dimensions != dimensions {
                return Err(DomainError::configuration(format!(
                    "Collection '{}' already exists with {} dimensions",
                    name, existing.dimensions
                )));
            }
            return Ok(());
        }

        collections.insert(
            name.to_string(),
            Collection {
                dimensions,
                metric,
                points: HashMap::new(),
            },
        );

        Ok(())
    }

    async fn upsert(&self, collection: &str, point: VectorPoint) -> Result<(), DomainError> {
        let mut collections = self.collections.write().await;

        let collection = collections
            .get_mut(collection)
            .ok_or_else(|| DomainError::not_found(format!("Collection '{}' not found", collection)))?;

        if point.dimensions() != collection.dimensions {
            return Err(DomainError::dimension_mismatch(
                collection.dimensions,
                point.dimensions(),
            ));
        }

        collection.points.insert(point.id.clone(), point);

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, DomainError> {
        let collections = self.collections.read().await;

        let collection = collections
            .get(collection)
            .ok_or_else(|| DomainError::not_found(format!("Collection '{}' not found", collection)))?;

        if vector.len() != collection.dimensions {
            return Err(DomainError::dimension_mismatch(
                collection.dimensions,
                vector.len(),
            ));
        }

        let mut results: Vec<ScoredPoint> = collection
            .points
            .values()
            .map(|point| {
                ScoredPoint::new(
                    &point.id,
                    cosine_similarity(vector, &point.vector),
                    point.payload.clone(),
                )
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DomainError> {
        let mut collections = self.collections.write().await;

        if let Some(collection) = collections.get_mut(collection) {
            collection.points.remove(id);
        }

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLLECTION: &str = "solution_embeddings";

    async fn index_with_collection(dimensions: usize) -> InMemoryVectorIndex {
        let index = InMemoryVectorIndex::new();
        index
            .ensure_collection(COLLECTION, dimensions, DistanceMetric::Cosine)
            .await
            .unwrap();
        index
    }

    fn payload(solution_id: &str) -> HashMap<String, serde_json::Value> {
        let mut payload = HashMap::new();
        payload.insert("solution_id".to_string(), json!(solution_id));
        payload.insert("type".to_string(), json!("solution"));
        payload
    }

    #[tokio::test]
    async fn test_ensure_collection_idempotent() {
        let index = index_with_collection(3).await;

        index
            .ensure_collection(COLLECTION, 3, DistanceMetric::Cosine)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ensure_collection_dimension_conflict() {
        let index = index_with_collection(3).await;

        let result = index
            .ensure_collection(COLLECTION, 4, DistanceMetric::Cosine)
            .await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_upsert_and_query_round_trip() {
        let index = index_with_collection(3).await;
        let vector = vec![0.6, 0.8, 0.0];

        index
            .upsert(
                COLLECTION,
                VectorPoint::new("sol_1", vector.clone(), payload("s-1")),
            )
            .await
            .unwrap();

        let results = index.query(COLLECTION, &vector, 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "sol_1");
        assert!((results[0].score - 1.0).abs() < 0.0001);
        assert_eq!(results[0].payload_str("solution_id"), Some("s-1"));
    }

    #[tokio::test]
    async fn test_query_orders_by_similarity() {
        let index = index_with_collection(2).await;

        index
            .upsert(COLLECTION, VectorPoint::new("far", vec![0.0, 1.0], payload("s-1")))
            .await
            .unwrap();
        index
            .upsert(
                COLLECTION,
                VectorPoint::new("near", vec![0.9, 0.1], payload("s-2")),
            )
            .await
            .unwrap();

        let results = index.query(COLLECTION, &[1.0, 0.0], 5).await.unwrap();

        assert_eq!(results[0].id, "near");
        assert_eq!(results[1].id, "far");
    }

    #[tokio::test]
    async fn test_query_respects_limit() {
        let index = index_with_collection(2).await;

        for i in 0..10 {
            index
                .upsert(
                    COLLECTION,
                    VectorPoint::new(format!("p-{}", i), vec![1.0, i as f32], payload("s")),
                )
                .await
                .unwrap();
        }

        let results = index.query(COLLECTION, &[1.0, 0.0], 5).await.unwrap();

        assert_eq!(results.len(), 5);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let index = index_with_collection(2).await;

        index
            .upsert(COLLECTION, VectorPoint::new("p-1", vec![1.0, 0.0], payload("old")))
            .await
            .unwrap();
        index
            .upsert(COLLECTION, VectorPoint::new("p-1", vec![0.0, 1.0], payload("new")))
            .await
            .unwrap();

        let results = index.query(COLLECTION, &[0.0, 1.0], 5).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].payload_str("solution_id"), Some("new"));
    }

    #[tokio::test]
    async fn test_upsert_dimension_mismatch() {
        let index = index_with_collection(3).await;

        let result = index
            .upsert(COLLECTION, VectorPoint::new("p-1", vec![1.0, 0.0], payload("s")))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_ok() {
        let index = index_with_collection(2).await;

        index.delete(COLLECTION, "no-such-id").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_point() {
        let index = index_with_collection(2).await;

        index
            .upsert(COLLECTION, VectorPoint::new("p-1", vec![1.0, 0.0], payload("s")))
            .await
            .unwrap();
        index.delete(COLLECTION, "p-1").await.unwrap();

        let results = index.query(COLLECTION, &[1.0, 0.0], 5).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_query_unknown_collection_fails() {
        let index = InMemoryVectorIndex::new();

        let result = index.query("missing", &[1.0], 5).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
