//! Offline embedding backend based on feature hashing
//!
//! No model weights and no network: each whitespace token is hashed into a
//! fixed-dimension accumulator and the result is L2-normalized. Quality is
//! far below a real model, but vectors are deterministic and texts sharing
//! vocabulary land close together, which is enough for development and tests.

use async_trait::async_trait;

use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;

/// Local feature-hashing embedding provider
#[derive(Debug, Clone)]
pub struct HashEmbeddingProvider {
    dimensions: usize,
}

impl HashEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            let slot = (fnv1a(&token) % self.dimensions as u64) as usize;
            vector[slot] += 1.0;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

/// FNV-1a over the token bytes
fn fnv1a(token: &str) -> u64 {
    token
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let embeddings: Vec<Embedding> = request
            .inputs()
            .iter()
            .enumerate()
            .map(|(index, text)| Embedding::new(index, self.embed_text(text)))
            .collect();

        Ok(EmbeddingResponse::new(
            request.model().to_string(),
            embeddings,
            EmbeddingUsage::default(),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "local-hash"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::cosine_similarity;

    #[tokio::test]
    async fn test_produces_configured_dimensions() {
        let provider = HashEmbeddingProvider::new(64);
        let request = EmbeddingRequest::single("feature-hash", "hello world");

        let response = provider.embed(request).await.unwrap();

        assert_eq!(response.first().unwrap().dimensions(), 64);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let provider = HashEmbeddingProvider::new(64);

        let first = provider
            .embed(EmbeddingRequest::single("feature-hash", "hello world"))
            .await
            .unwrap();
        let second = provider
            .embed(EmbeddingRequest::single("feature-hash", "hello world"))
            .await
            .unwrap();

        assert_eq!(
            first.first().unwrap().vector(),
            second.first().unwrap().vector()
        );
    }

    #[tokio::test]
    async fn test_normalized() {
        let provider = HashEmbeddingProvider::new(64);

        let response = provider
            .embed(EmbeddingRequest::single("feature-hash", "a b c d e"))
            .await
            .unwrap();

        let norm: f32 = response
            .first()
            .unwrap()
            .vector()
            .iter()
            .map(|x| x * x)
            .sum::<f32>()
            .sqrt();

        assert!((norm - 1.0).abs() < 0.0001);
    }

    #[tokio::test]
    async fn test_identical_texts_most_similar() {
        let provider = HashEmbeddingProvider::new(128);

        let embed = |text: &str| {
            let provider = provider.clone();
            let text = text.to_string();
            async move {
                provider
                    .embed(EmbeddingRequest::single("feature-hash", text))
                    .await
                    .unwrap()
                    .first()
                    .unwrap()
                    .vector()
                    .to_vec()
            }
        };

        let query = embed("photosynthesis converts light into energy").await;
        let same = embed("photosynthesis converts light into energy").await;
        let related = embed("photosynthesis uses light").await;
        let unrelated = embed("the stock market closed higher today").await;

        let self_similarity = cosine_similarity(&query, &same);
        let related_similarity = cosine_similarity(&query, &related);
        let unrelated_similarity = cosine_similarity(&query, &unrelated);

        assert!((self_similarity - 1.0).abs() < 0.0001);
        assert!(related_similarity > unrelated_similarity);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = HashEmbeddingProvider::new(16);

        let response = provider
            .embed(EmbeddingRequest::single("feature-hash", ""))
            .await
            .unwrap();

        assert!(response.first().unwrap().vector().iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_batch() {
        let provider = HashEmbeddingProvider::new(16);
        let request =
            EmbeddingRequest::batch("feature-hash", vec!["one".into(), "two".into()]);

        let response = provider.embed(request).await.unwrap();

        assert_eq!(response.embeddings().len(), 2);
    }
}
