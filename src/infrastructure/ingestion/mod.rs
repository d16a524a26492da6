//! Chunking strategy implementations

mod boundary;

pub use boundary::BoundaryChunker;
