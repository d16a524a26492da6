//! Vector index record types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Distance metric for nearest-neighbor queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    Cosine,
}

impl DistanceMetric {
    /// Metric name in the form the Qdrant REST API expects
    pub fn as_qdrant_str(&self) -> &'static str {
        match self {
            Self::Cosine => "Cosine",
        }
    }
}

/// A record to store in the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: HashMap<String, serde_json::Value>,
}

impl VectorPoint {
    pub fn new(
        id: impl Into<String>,
        vector: Vec<f32>,
        payload: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            vector,
            payload,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// A query hit: record id, similarity score and stored payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f32,
    pub payload: HashMap<String, serde_json::Value>,
}

impl ScoredPoint {
    pub fn new(
        id: impl Into<String>,
        score: f32,
        payload: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            score,
            payload,
        }
    }

    /// String payload field, if present
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }
}
