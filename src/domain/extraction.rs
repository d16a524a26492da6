//! Text extraction seam
//!
//! Document parsing (PDF, Word, OCR) lives outside this crate; the pipeline
//! only needs plain text for a stored file given its declared content type.

use std::fmt::Debug;

use crate::domain::DomainError;

/// Turns stored file bytes into plain text
pub trait TextExtractor: Send + Sync + Debug {
    /// Whether this extractor handles the given content type
    fn supports(&self, content_type: &str) -> bool;

    /// Extract plain text from raw bytes of the given content type
    fn extract(&self, bytes: &[u8], content_type: &str) -> Result<String, DomainError>;
}
