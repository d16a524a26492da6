//! Grading result types

use serde::{Deserialize, Serialize};

/// Structured fields extracted from a raw model reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingOutcome {
    pub score: f64,
    pub rationale: String,
    pub feedback: String,
}

/// How the reference text for a grading attempt was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingMethod {
    /// Most recent solution of the assignment
    Direct,
    /// Concatenation of retrieved similar solutions
    Rag,
}

impl GradingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Rag => "rag",
        }
    }
}

/// Outcome of one successful grading attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingResult {
    pub grade_id: String,
    pub score: f64,
    /// Rationale and suggestions, concatenated
    pub feedback: String,
    pub max_score: f64,
    pub raw_model_response: String,
    pub method: GradingMethod,
    /// Number of retrieved reference solutions (0 for direct grading)
    pub retrieved_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_string(&GradingMethod::Direct).unwrap(),
            "\"direct\""
        );
        assert_eq!(serde_json::to_string(&GradingMethod::Rag).unwrap(), "\"rag\"");
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(GradingMethod::Direct.as_str(), "direct");
        assert_eq!(GradingMethod::Rag.as_str(), "rag");
    }
}
