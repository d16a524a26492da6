//! Pipeline services

mod grading_service;
mod retrieval_service;

pub use grading_service::GradingService;
pub use retrieval_service::{RetrievalService, DEFAULT_SEARCH_LIMIT};
