//! Embedding backend implementations

mod local;
mod openai;
mod resilient;

pub use local::HashEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
pub use resilient::ResilientEmbeddingProvider;
