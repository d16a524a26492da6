//! Vector index provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{DistanceMetric, ScoredPoint, VectorPoint};
use crate::domain::DomainError;

/// Trait for vector index backends
///
/// Every stored vector must have exactly the dimensionality the collection
/// was created with; a mismatched upsert fails with `DimensionMismatch`.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync + Debug {
    /// Create the collection if it does not exist yet; idempotent
    async fn ensure_collection(
        &self,
        name: &str,
        dimensions: usize,
        metric: DistanceMetric,
    ) -> Result<(), DomainError>;

    /// Insert or replace the record at `point.id`
    async fn upsert(&self, collection: &str, point: VectorPoint) -> Result<(), DomainError>;

    /// Nearest neighbors of `vector`, most similar first, at most `limit`
    async fn query(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, DomainError>;

    /// Remove a record; deleting a missing id is not an error
    async fn delete(&self, collection: &str, id: &str) -> Result<(), DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
