//! In-memory repositories standing in for the external relational store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::model::{Assignment, Grade, Solution, Submission, SubmissionStatus};
use crate::domain::repository::{
    AssignmentRepository, GradeRepository, SolutionRepository, SubmissionRepository,
};
use crate::domain::DomainError;

/// In-memory assignment store
#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepository {
    assignments: RwLock<HashMap<String, Assignment>>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments
            .get_mut()
            .insert(assignment.id.clone(), assignment);
        self
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn get(&self, id: &str) -> Result<Option<Assignment>, DomainError> {
        Ok(self.assignments.read().await.get(id).cloned())
    }

    async fn create(&self, assignment: Assignment) -> Result<Assignment, DomainError> {
        self.assignments
            .write()
            .await
            .insert(assignment.id.clone(), assignment.clone());
        Ok(assignment)
    }
}

/// In-memory solution store
#[derive(Debug, Default)]
pub struct InMemorySolutionRepository {
    solutions: RwLock<HashMap<String, Solution>>,
}

impl InMemorySolutionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_solution(mut self, solution: Solution) -> Self {
        self.solutions
            .get_mut()
            .insert(solution.id.clone(), solution);
        self
    }
}

#[async_trait]
impl SolutionRepository for InMemorySolutionRepository {
    async fn get(&self, id: &str) -> Result<Option<Solution>, DomainError> {
        Ok(self.solutions.read().await.get(id).cloned())
    }

    async fn create(&self, solution: Solution) -> Result<Solution, DomainError> {
        self.solutions
            .write()
            .await
            .insert(solution.id.clone(), solution.clone());
        Ok(solution)
    }

    async fn list_by_assignment(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Solution>, DomainError> {
        let mut solutions: Vec<Solution> = self
            .solutions
            .read()
            .await
            .values()
            .filter(|solution| solution.assignment_id == assignment_id)
            .cloned()
            .collect();

        solutions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(solutions)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.solutions.write().await.remove(id).is_some())
    }
}

/// In-memory submission store
#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    submissions: RwLock<HashMap<String, Submission>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submission(mut self, submission: Submission) -> Self {
        self.submissions
            .get_mut()
            .insert(submission.id.clone(), submission);
        self
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn get(&self, id: &str) -> Result<Option<Submission>, DomainError> {
        Ok(self.submissions.read().await.get(id).cloned())
    }

    async fn create(&self, submission: Submission) -> Result<Submission, DomainError> {
        self.submissions
            .write()
            .await
            .insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn transition_status(
        &self,
        id: &str,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Result<bool, DomainError> {
        let mut submissions = self.submissions.write().await;

        let submission = submissions
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("Submission '{}' not found", id)))?;

        if submission.status != from {
            return Ok(false);
        }

        submission.status = to;
        Ok(true)
    }
}

/// In-memory grade store
#[derive(Debug, Default)]
pub struct InMemoryGradeRepository {
    grades: RwLock<HashMap<String, Grade>>,
}

impl InMemoryGradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GradeRepository for InMemoryGradeRepository {
    async fn create(&self, grade: Grade) -> Result<Grade, DomainError> {
        self.grades
            .write()
            .await
            .insert(grade.id.clone(), grade.clone());
        Ok(grade)
    }

    async fn list_by_submission(&self, submission_id: &str) -> Result<Vec<Grade>, DomainError> {
        Ok(self
            .grades
            .read()
            .await
            .values()
            .filter(|grade| grade.submission_id == submission_id)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.grades.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_assignment_round_trip() {
        let repository = InMemoryAssignmentRepository::new();
        let assignment = Assignment::new("Essay 1", 10.0).with_id("a-1");

        repository.create(assignment).await.unwrap();

        let found = repository.get("a-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Essay 1");
        assert!(repository.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_solutions_listed_newest_first() {
        let repository = InMemorySolutionRepository::new();
        let now = Utc::now();

        repository
            .create(
                Solution::new("a-1", "old")
                    .with_id("s-old")
                    .with_created_at(now - Duration::hours(2)),
            )
            .await
            .unwrap();
        repository
            .create(Solution::new("a-1", "new").with_id("s-new").with_created_at(now))
            .await
            .unwrap();
        repository
            .create(Solution::new("a-2", "other").with_id("s-other"))
            .await
            .unwrap();

        let solutions = repository.list_by_assignment("a-1").await.unwrap();

        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].id, "s-new");
        assert_eq!(solutions[1].id, "s-old");
    }

    #[tokio::test]
    async fn test_solution_delete() {
        let repository = InMemorySolutionRepository::new();
        repository
            .create(Solution::new("a-1", "text").with_id("s-1"))
            .await
            .unwrap();

        assert!(repository.delete("s-1").await.unwrap());
        assert!(!repository.delete("s-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_transition_status_applies_when_matching() {
        let repository = InMemorySubmissionRepository::new();
        repository
            .create(Submission::new("a-1", "answer").with_id("sub-1"))
            .await
            .unwrap();

        let moved = repository
            .transition_status("sub-1", SubmissionStatus::Pending, SubmissionStatus::Graded)
            .await
            .unwrap();

        assert!(moved);
        assert_eq!(
            repository.get("sub-1").await.unwrap().unwrap().status,
            SubmissionStatus::Graded
        );
    }

    #[tokio::test]
    async fn test_transition_status_rejects_stale_expectation() {
        let repository = InMemorySubmissionRepository::new();
        repository
            .create(
                Submission::new("a-1", "answer")
                    .with_id("sub-1")
                    .with_status(SubmissionStatus::Graded),
            )
            .await
            .unwrap();

        let moved = repository
            .transition_status("sub-1", SubmissionStatus::Pending, SubmissionStatus::Graded)
            .await
            .unwrap();

        assert!(!moved);
        assert_eq!(
            repository.get("sub-1").await.unwrap().unwrap().status,
            SubmissionStatus::Graded
        );
    }

    #[tokio::test]
    async fn test_transition_status_missing_submission() {
        let repository = InMemorySubmissionRepository::new();

        let result = repository
            .transition_status("missing", SubmissionStatus::Pending, SubmissionStatus::Graded)
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_grade_count_and_listing() {
        let repository = InMemoryGradeRepository::new();

        assert_eq!(repository.count().await.unwrap(), 0);

        repository
            .create(Grade::new("sub-1", 8.0, "ดี"))
            .await
            .unwrap();
        repository
            .create(Grade::new("sub-2", 5.0, "พอใช้"))
            .await
            .unwrap();

        assert_eq!(repository.count().await.unwrap(), 2);
        assert_eq!(
            repository.list_by_submission("sub-1").await.unwrap().len(),
            1
        );
    }
}
