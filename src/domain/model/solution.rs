use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference answer for one assignment
///
/// Multiple solutions may exist per assignment. `vector_id` is a
/// back-reference to the solution's embedding in the vector index; it is a
/// lookup handle only, the index owns the embedding record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub assignment_id: String,
    /// Plain text extracted from the uploaded solution document
    pub content_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Solution {
    /// Create a new solution with a generated identifier
    pub fn new(assignment_id: impl Into<String>, content_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            assignment_id: assignment_id.into(),
            content_text: content_text.into(),
            vector_id: None,
            created_at: Utc::now(),
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach the vector index back-reference
    pub fn with_vector_id(mut self, vector_id: impl Into<String>) -> Self {
        self.vector_id = Some(vector_id.into());
        self
    }

    /// Override the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
