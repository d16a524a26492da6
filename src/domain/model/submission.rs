use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a submission
///
/// Grading may only be attempted while the submission is `Pending`. The
/// grading orchestrator moves it to `Graded`; the external approval workflow
/// later moves it to `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Graded,
    Approved,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Graded => "graded",
            Self::Approved => "approved",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's answer to an assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    /// Plain text extracted from the uploaded answer document
    pub content_text: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Create a new pending submission with a generated identifier
    pub fn new(assignment_id: impl Into<String>, content_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            assignment_id: assignment_id.into(),
            content_text: content_text.into(),
            status: SubmissionStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Override the initial status
    pub fn with_status(mut self, status: SubmissionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_starts_pending() {
        let submission = Submission::new("a-1", "my answer");

        assert!(submission.is_pending());
        assert_eq!(submission.status, SubmissionStatus::Pending);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SubmissionStatus::Pending.to_string(), "pending");
        assert_eq!(SubmissionStatus::Graded.to_string(), "graded");
        assert_eq!(SubmissionStatus::Approved.to_string(), "approved");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&SubmissionStatus::Graded).unwrap();
        assert_eq!(json, "\"graded\"");
    }
}
