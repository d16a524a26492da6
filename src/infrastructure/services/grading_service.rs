//! Grading service - coordinates retrieval, prompting, parsing and persistence

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::grading::{
    build_grading_prompt, extract_grading_outcome, GradingMethod, GradingResult,
    SYSTEM_INSTRUCTION,
};
use crate::domain::model::{Assignment, Grade, Submission, SubmissionStatus};
use crate::domain::repository::{
    AssignmentRepository, GradeRepository, SolutionRepository, SubmissionRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::llm::LlmClient;
use crate::infrastructure::services::retrieval_service::{
    RetrievalService, DEFAULT_SEARCH_LIMIT,
};

/// Top-level grading orchestrator
#[derive(Debug)]
pub struct GradingService {
    assignments: Arc<dyn AssignmentRepository>,
    solutions: Arc<dyn SolutionRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    grades: Arc<dyn GradeRepository>,
    llm: Arc<LlmClient>,
    retrieval: Arc<RetrievalService>,
}

impl GradingService {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        solutions: Arc<dyn SolutionRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        grades: Arc<dyn GradeRepository>,
        llm: Arc<LlmClient>,
        retrieval: Arc<RetrievalService>,
    ) -> Self {
        Self {
            assignments,
            solutions,
            submissions,
            grades,
            llm,
            retrieval,
        }
    }

    /// Grade a submission against its assignment's most recent solution
    pub async fn grade_submission_with_llm(
        &self,
        submission_id: &str,
    ) -> Result<GradingResult, DomainError> {
        let submission = self.load_pending_submission(submission_id).await?;
        let assignment = self.load_assignment(&submission.assignment_id).await?;

        self.grade_direct(&submission, &assignment).await
    }

    /// Grade a submission against solutions retrieved by similarity search
    ///
    /// Falls back to direct grading when retrieval yields nothing usable or
    /// anything in the retrieval path fails.
    pub async fn grade_with_rag(
        &self,
        submission_id: &str,
    ) -> Result<GradingResult, DomainError> {
        let submission = self.load_pending_submission(submission_id).await?;
        let assignment = self.load_assignment(&submission.assignment_id).await?;

        match self.combined_reference(&submission).await {
            Ok(Some((reference, retrieved_count))) => {
                self.grade_against_reference(
                    &submission,
                    &assignment,
                    &reference,
                    GradingMethod::Rag,
                    retrieved_count,
                )
                .await
            }
            Ok(None) => {
                debug!(
                    submission_id = %submission.id,
                    "no similar solutions found, falling back to direct grading"
                );
                self.grade_direct(&submission, &assignment).await
            }
            Err(error) => {
                warn!(
                    submission_id = %submission.id,
                    %error,
                    "retrieval path failed, falling back to direct grading"
                );
                self.grade_direct(&submission, &assignment).await
            }
        }
    }

    async fn grade_direct(
        &self,
        submission: &Submission,
        assignment: &Assignment,
    ) -> Result<GradingResult, DomainError> {
        let solutions = self.solutions.list_by_assignment(&assignment.id).await?;

        let solution = solutions
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::no_reference(&assignment.id))?;

        self.grade_against_reference(
            submission,
            assignment,
            &solution.content_text,
            GradingMethod::Direct,
            0,
        )
        .await
    }

    async fn grade_against_reference(
        &self,
        submission: &Submission,
        assignment: &Assignment,
        reference_text: &str,
        method: GradingMethod,
        retrieved_count: usize,
    ) -> Result<GradingResult, DomainError> {
        let prompt =
            build_grading_prompt(reference_text, &submission.content_text, assignment.total_score);

        let raw_response = self.llm.complete(SYSTEM_INSTRUCTION, &prompt).await;
        let outcome = extract_grading_outcome(&raw_response);

        let feedback = format!("{}\n\n{}", outcome.rationale, outcome.feedback);
        let grade = self
            .grades
            .create(Grade::new(&submission.id, outcome.score, &feedback))
            .await?;

        let transitioned = self
            .submissions
            .transition_status(&submission.id, SubmissionStatus::Pending, SubmissionStatus::Graded)
            .await?;

        if !transitioned {
            warn!(
                submission_id = %submission.id,
                "submission status changed during grading, leaving it as is"
            );
        }

        info!(
            submission_id = %submission.id,
            grade_id = %grade.id,
            score = outcome.score,
            method = method.as_str(),
            retrieved_count,
            "submission graded"
        );

        Ok(GradingResult {
            grade_id: grade.id,
            score: outcome.score,
            feedback,
            max_score: assignment.total_score,
            raw_model_response: raw_response,
            method,
            retrieved_count,
        })
    }

    /// Resolve retrieved candidates back to solution texts
    ///
    /// Returns `None` when there is nothing usable: no hits, no resolvable
    /// `solution_id` payloads, or only empty texts.
    async fn combined_reference(
        &self,
        submission: &Submission,
    ) -> Result<Option<(String, usize)>, DomainError> {
        let hits = self
            .retrieval
            .find_similar(&submission.content_text, DEFAULT_SEARCH_LIMIT)
            .await;

        if hits.is_empty() {
            return Ok(None);
        }

        let mut texts = Vec::new();

        for hit in &hits {
            let Some(solution_id) = hit.payload_str("solution_id") else {
                continue;
            };

            if let Some(solution) = self.solutions.get(solution_id).await? {
                if !solution.content_text.is_empty() {
                    texts.push(solution.content_text);
                }
            }
        }

        if texts.is_empty() {
            return Ok(None);
        }

        let retrieved_count = texts.len();

        Ok(Some((texts.join("\n\n"), retrieved_count)))
    }

    async fn load_pending_submission(&self, id: &str) -> Result<Submission, DomainError> {
        let submission = self
            .submissions
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Submission '{}' not found", id)))?;

        if !submission.is_pending() {
            return Err(DomainError::already_graded(
                &submission.id,
                submission.status.to_string(),
            ));
        }

        Ok(submission)
    }

    async fn load_assignment(&self, id: &str) -> Result<Assignment, DomainError> {
        self.assignments
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Assignment '{}' not found", id)))
    }
}
