//! Boundary-aware chunking strategy
//!
//! Splits on character counts but avoids cutting inside a word: when the
//! target cut lands mid-word, the cut retracts to the nearest preceding
//! whitespace or punctuation boundary within the current window. Texts
//! without any boundary (continuous scripts such as Thai) fall back to hard
//! cuts at the target size.

use crate::domain::ingestion::{helpers, Chunk, ChunkingConfig, ChunkingStrategy, ChunkMetadata};
use crate::domain::DomainError;

/// Chunker that respects word and punctuation boundaries
#[derive(Debug, Clone, Default)]
pub struct BoundaryChunker;

impl BoundaryChunker {
    pub fn new() -> Self {
        Self
    }

    /// Where to end the chunk that starts at `start` and aims at `target`
    fn cut_point(&self, chars: &[char], start: usize, target: usize) -> usize {
        if target >= chars.len() {
            return chars.len();
        }

        // Cutting right before a boundary char keeps the word intact
        if helpers::is_boundary_char(chars[target]) {
            return target;
        }

        let mut pos = target;
        while pos > start {
            if helpers::is_boundary_char(chars[pos - 1]) {
                return pos;
            }
            pos -= 1;
        }

        // No boundary in the window: accept the hard cut
        target
    }
}

impl ChunkingStrategy for BoundaryChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let chars: Vec<char> = content.chars().collect();

        if chars.is_empty() {
            return Ok(vec![]);
        }

        if chars.len() <= config.chunk_size {
            return Ok(vec![Chunk::new(
                content,
                ChunkMetadata::new(0, 1, 0, chars.len()),
            )]);
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < chars.len() {
            let target = (start + config.chunk_size).min(chars.len());
            let end = self.cut_point(&chars, start, target);

            let piece: String = chars[start..end].iter().collect();
            chunks.push(Chunk::new(
                piece,
                ChunkMetadata::new(chunks.len(), 0, start, end),
            ));

            if end >= chars.len() {
                break;
            }

            // Step back by the overlap, but never stall or move backward
            let next = end.saturating_sub(config.chunk_overlap);
            start = if next <= start { end } else { next };
        }

        let total = chunks.len();
        for chunk in &mut chunks {
            chunk.metadata.total_chunks = total;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "boundary"
    }
}
