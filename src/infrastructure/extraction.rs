//! Text extraction implementations
//!
//! Only plain text is handled in-process; PDF, Word and OCR extraction are
//! the responsibility of the external document service.

use std::path::Path;

use crate::domain::extraction::TextExtractor;
use crate::domain::DomainError;

/// Extractor for `text/*` content
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PlainTextExtractor {
    fn supports(&self, content_type: &str) -> bool {
        content_type.starts_with("text/")
    }

    fn extract(&self, bytes: &[u8], content_type: &str) -> Result<String, DomainError> {
        if !self.supports(content_type) {
            return Err(DomainError::validation(format!(
                "Unsupported content type '{}'",
                content_type
            )));
        }

        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Resolve the declared content type for a file path
pub fn content_type_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
