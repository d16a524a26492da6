use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An assignment students submit answers for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    /// Maximum score a submission can receive
    pub total_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// Create a new assignment with a generated identifier
    pub fn new(title: impl Into<String>, total_score: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            total_score,
            created_at: Utc::now(),
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
