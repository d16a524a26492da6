//! Entities referenced by the grading pipeline
//!
//! Solutions, submissions and grades are owned by the external relational
//! store; the pipeline holds them by identifier only.

mod assignment;
mod grade;
mod solution;
mod submission;

pub use assignment::Assignment;
pub use grade::Grade;
pub use solution::Solution;
pub use submission::{Submission, SubmissionStatus};
