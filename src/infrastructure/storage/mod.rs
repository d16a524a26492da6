//! Repository implementations

mod in_memory;

pub use in_memory::{
    InMemoryAssignmentRepository, InMemoryGradeRepository, InMemorySolutionRepository,
    InMemorySubmissionRepository,
};
