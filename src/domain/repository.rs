//! Repository traits over the external relational store
//!
//! The store itself is an external collaborator; the pipeline only needs
//! these narrow per-entity capabilities.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::model::{Assignment, Grade, Solution, Submission, SubmissionStatus};
use crate::domain::DomainError;

#[async_trait]
pub trait AssignmentRepository: Send + Sync + Debug {
    async fn get(&self, id: &str) -> Result<Option<Assignment>, DomainError>;

    async fn create(&self, assignment: Assignment) -> Result<Assignment, DomainError>;
}

#[async_trait]
pub trait SolutionRepository: Send + Sync + Debug {
    async fn get(&self, id: &str) -> Result<Option<Solution>, DomainError>;

    async fn create(&self, solution: Solution) -> Result<Solution, DomainError>;

    /// List solutions for an assignment, most recently created first
    async fn list_by_assignment(&self, assignment_id: &str)
        -> Result<Vec<Solution>, DomainError>;

    /// Delete a solution, returns true if it existed
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync + Debug {
    async fn get(&self, id: &str) -> Result<Option<Submission>, DomainError>;

    async fn create(&self, submission: Submission) -> Result<Submission, DomainError>;

    /// Conditionally move a submission from one status to another
    ///
    /// Returns true only if the stored status matched `from` and the update
    /// was applied. This is the serialization point for at-most-one grading
    /// per submission.
    async fn transition_status(
        &self,
        id: &str,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait GradeRepository: Send + Sync + Debug {
    async fn create(&self, grade: Grade) -> Result<Grade, DomainError>;

    async fn list_by_submission(&self, submission_id: &str) -> Result<Vec<Grade>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
