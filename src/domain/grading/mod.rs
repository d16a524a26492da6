//! Grading prompt construction and result extraction

mod parser;
mod prompt;
mod result;

pub use parser::extract_grading_outcome;
pub use prompt::{build_grading_prompt, labels, SYSTEM_INSTRUCTION};
pub use result::{GradingMethod, GradingOutcome, GradingResult};
