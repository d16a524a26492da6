use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One grading outcome for a submission
///
/// `feedback` holds the model's rationale and suggestions concatenated.
/// A grade always starts unapproved; a teacher approves it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: String,
    pub submission_id: String,
    pub score: f64,
    pub feedback: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Grade {
    /// Create a new unapproved grade with a generated identifier
    pub fn new(submission_id: impl Into<String>, score: f64, feedback: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            submission_id: submission_id.into(),
            score,
            feedback: feedback.into(),
            approved: false,
            created_at: Utc::now(),
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_starts_unapproved() {
        let grade = Grade::new("sub-1", 8.5, "ดีมาก");

        assert_eq!(grade.submission_id, "sub-1");
        assert_eq!(grade.score, 8.5);
        assert!(!grade.approved);
    }
}
