//! Command line interface

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::config::AppConfig;
use crate::domain::extraction::TextExtractor;
use crate::domain::model::{Assignment, Solution, Submission};
use crate::infrastructure::extraction::{content_type_for_path, PlainTextExtractor};
use crate::infrastructure::index::InMemoryVectorIndex;
use crate::infrastructure::ingestion::BoundaryChunker;
use crate::infrastructure::services::{GradingService, RetrievalService};
use crate::infrastructure::storage::{
    InMemoryAssignmentRepository, InMemoryGradeRepository, InMemorySolutionRepository,
    InMemorySubmissionRepository,
};
use crate::{
    build_embedding_provider, build_llm_client, build_retrieval_service, build_vector_index,
};

#[derive(Debug, Parser)]
#[command(
    name = "grading-assistant",
    about = "LLM-assisted grading of free-text submissions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grade a submission file against a solution file
    Grade {
        /// Reference solution file (plain text)
        #[arg(long)]
        solution: PathBuf,
        /// Student submission file (plain text)
        #[arg(long)]
        submission: PathBuf,
        /// Maximum score for the assignment
        #[arg(long, default_value_t = 10.0)]
        max_score: f64,
    },
    /// Chunk, embed and store a solution document in the vector index
    Ingest {
        /// Identifier of the solution the vectors belong to
        #[arg(long)]
        solution_id: String,
        /// Solution file (plain text)
        #[arg(long)]
        file: PathBuf,
    },
    /// Search the vector index for solutions similar to a query
    Search {
        /// Query text
        #[arg(long)]
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Grade {
            solution,
            submission,
            max_score,
        } => run_grade(config, &solution, &submission, max_score).await,
        Command::Ingest { solution_id, file } => run_ingest(config, &solution_id, &file).await,
        Command::Search { query, limit } => run_search(config, &query, limit).await,
    }
}

/// One-shot direct grading of two files
async fn run_grade(
    config: &AppConfig,
    solution_path: &Path,
    submission_path: &Path,
    max_score: f64,
) -> anyhow::Result<()> {
    let solution_text = read_text(solution_path)?;
    let submission_text = read_text(submission_path)?;

    let assignment = Assignment::new("ad-hoc grading", max_score);
    let solution = Solution::new(&assignment.id, solution_text);
    let submission = Submission::new(&assignment.id, submission_text);
    let submission_id = submission.id.clone();

    let assignments = Arc::new(InMemoryAssignmentRepository::new().with_assignment(assignment));
    let solutions = Arc::new(InMemorySolutionRepository::new().with_solution(solution));
    let submissions = Arc::new(InMemorySubmissionRepository::new().with_submission(submission));
    let grades = Arc::new(InMemoryGradeRepository::new());

    // direct grading does not touch the vector backend
    let retrieval = Arc::new(RetrievalService::new(
        build_embedding_provider(config),
        Arc::new(InMemoryVectorIndex::new()),
        Arc::new(BoundaryChunker::new()),
        &config.vector.collection,
        &config.embedding.model,
    ));

    let service = GradingService::new(
        assignments,
        solutions,
        submissions,
        grades,
        build_llm_client(config),
        retrieval,
    );

    let result = service.grade_submission_with_llm(&submission_id).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Store a solution document in the vector index
async fn run_ingest(config: &AppConfig, solution_id: &str, file: &Path) -> anyhow::Result<()> {
    let text = read_text(file)?;

    let retrieval = build_retrieval_service(
        config,
        build_embedding_provider(config),
        build_vector_index(config),
    );

    retrieval.ensure_ready().await?;

    let metadata = HashMap::from([(
        "source_file".to_string(),
        json!(file.display().to_string()),
    )]);

    // long documents go through the chunked path
    let vector_ids = if text.chars().count() > config.chunking.chunk_size {
        retrieval
            .store_solution_chunks(solution_id, &text, &config.chunking, metadata)
            .await?
    } else {
        vec![retrieval.store_solution(solution_id, &text, metadata).await?]
    };

    println!("{}", serde_json::to_string_pretty(&vector_ids)?);

    Ok(())
}

/// Query the vector index
async fn run_search(config: &AppConfig, query: &str, limit: usize) -> anyhow::Result<()> {
    let retrieval = build_retrieval_service(
        config,
        build_embedding_provider(config),
        build_vector_index(config),
    );

    let hits = retrieval.find_similar(query, limit).await;

    println!("{}", serde_json::to_string_pretty(&hits)?);

    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file '{}'", path.display()))?;
    let content_type = content_type_for_path(path);

    let extractor = PlainTextExtractor::new();
    let text = extractor
        .extract(&bytes, &content_type)
        .with_context(|| format!("Failed to extract text from '{}'", path.display()))?;

    Ok(text)
}
