//! Chunking strategy trait and types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Configuration for chunking
///
/// Offsets and sizes are in characters, not bytes — submissions and
/// solutions are frequently Thai text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target maximum chunk size in characters
    pub chunk_size: usize,
    /// Number of trailing characters repeated at the start of the next chunk
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::configuration(
                "chunk_size must be greater than 0",
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::configuration(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Metadata for a chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Index of this chunk (0-based)
    pub chunk_index: usize,
    /// Total number of chunks
    pub total_chunks: usize,
    /// Character offset where this chunk starts
    pub char_start: usize,
    /// Character offset where this chunk ends
    pub char_end: usize,
}

impl ChunkMetadata {
    pub fn new(chunk_index: usize, total_chunks: usize, char_start: usize, char_end: usize) -> Self {
        Self {
            chunk_index,
            total_chunks,
            char_start,
            char_end,
        }
    }

    /// Convert to a JSON payload map for vector index storage
    pub fn to_json_map(&self) -> std::collections::HashMap<String, serde_json::Value> {
        let mut map = std::collections::HashMap::new();
        map.insert(
            "chunk_index".to_string(),
            serde_json::Value::Number(self.chunk_index.into()),
        );
        map.insert(
            "total_chunks".to_string(),
            serde_json::Value::Number(self.total_chunks.into()),
        );
        map.insert(
            "char_start".to_string(),
            serde_json::Value::Number(self.char_start.into()),
        );
        map.insert(
            "char_end".to_string(),
            serde_json::Value::Number(self.char_end.into()),
        );
        map
    }
}

/// A bounded segment of a larger text
#[derive(Debug, Clone)]
pub struct Chunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn index(&self) -> usize {
        self.metadata.chunk_index
    }

    /// Chunk length in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Trait for chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split content into chunks
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError>;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}

/// Helper functions for chunking
pub mod helpers {
    /// Punctuation that counts as a cut boundary in addition to whitespace
    pub const BOUNDARY_PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':'];

    /// Whether a cut directly after this character does not split a word
    pub fn is_boundary_char(c: char) -> bool {
        c.is_whitespace() || BOUNDARY_PUNCTUATION.contains(&c)
    }
}
