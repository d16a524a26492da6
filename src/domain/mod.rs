//! Domain layer - core grading pipeline logic and contracts

pub mod embedding;
pub mod error;
pub mod extraction;
pub mod grading;
pub mod index;
pub mod ingestion;
pub mod llm;
pub mod model;
pub mod repository;

pub use embedding::{
    cosine_similarity, Embedding, EmbeddingInput, EmbeddingProvider, EmbeddingRequest,
    EmbeddingResponse, EmbeddingUsage,
};
pub use error::DomainError;
pub use extraction::TextExtractor;
pub use grading::{
    build_grading_prompt, extract_grading_outcome, labels, GradingMethod, GradingOutcome,
    GradingResult, SYSTEM_INSTRUCTION,
};
pub use index::{DistanceMetric, ScoredPoint, VectorIndexProvider, VectorPoint};
pub use ingestion::{Chunk, ChunkingConfig, ChunkingStrategy, ChunkMetadata};
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use model::{Assignment, Grade, Solution, Submission, SubmissionStatus};
pub use repository::{
    AssignmentRepository, GradeRepository, SolutionRepository, SubmissionRepository,
};
