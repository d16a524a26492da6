//! Vector index backend implementations

mod in_memory;
mod qdrant;

pub use in_memory::InMemoryVectorIndex;
pub use qdrant::QdrantVectorIndex;
