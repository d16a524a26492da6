//! Vector index domain models and traits

mod point;
mod provider;

pub use point::{DistanceMetric, ScoredPoint, VectorPoint};
pub use provider::VectorIndexProvider;
