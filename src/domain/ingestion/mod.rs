//! Text chunking domain types

mod chunker;

pub use chunker::{helpers, Chunk, ChunkingConfig, ChunkingStrategy, ChunkMetadata};
