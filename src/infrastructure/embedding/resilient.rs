//! Graceful-degradation wrapper for embedding backends
//!
//! A transient embedding outage must not fail solution storage or grading.
//! This decorator converts any backend error into a degraded response: zero
//! vectors at the expected dimensionality, flagged so callers can tell them
//! apart from real embeddings. A zero vector is never the nearest neighbor
//! of real content, so retrieval quality degrades instead of halting.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Wraps an embedding provider and never returns an error
#[derive(Debug)]
pub struct ResilientEmbeddingProvider<P: EmbeddingProvider> {
    inner: P,
}

impl<P: EmbeddingProvider> ResilientEmbeddingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: EmbeddingProvider> EmbeddingProvider for ResilientEmbeddingProvider<P> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let model = request.model().to_string();
        let count = request.len();

        match self.inner.embed(request).await {
            Ok(response) => Ok(response),
            Err(error) => {
                warn!(
                    provider = self.inner.provider_name(),
                    %error,
                    "embedding backend unavailable, substituting zero vectors"
                );

                Ok(EmbeddingResponse::degraded_with_zeros(
                    model,
                    self.inner.dimensions(),
                    count,
                ))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}
