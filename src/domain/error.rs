use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Dimension mismatch: expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("No reference solution found for assignment '{assignment_id}'")]
    NoReference { assignment_id: String },

    #[error("Submission '{submission_id}' is not pending (status: {status})")]
    AlreadyGraded {
        submission_id: String,
        status: String,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn no_reference(assignment_id: impl Into<String>) -> Self {
        Self::NoReference {
            assignment_id: assignment_id.into(),
        }
    }

    pub fn already_graded(submission_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self::AlreadyGraded {
            submission_id: submission_id.into(),
            status: status.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Submission 'abc' not found");
        assert_eq!(error.to_string(), "Not found: Submission 'abc' not found");
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let error = DomainError::dimension_mismatch(1536, 384);
        assert_eq!(
            error.to_string(),
            "Dimension mismatch: expected 1536 dimensions, got 384"
        );
    }

    #[test]
    fn test_no_reference_error() {
        let error = DomainError::no_reference("assignment-1");
        assert_eq!(
            error.to_string(),
            "No reference solution found for assignment 'assignment-1'"
        );
    }

    #[test]
    fn test_already_graded_error() {
        let error = DomainError::already_graded("sub-1", "graded");
        assert_eq!(
            error.to_string(),
            "Submission 'sub-1' is not pending (status: graded)"
        );
    }
}
