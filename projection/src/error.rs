//! Error types for projection and rendering.

use thiserror::Error;

/// Result type alias for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Errors that can occur while projecting or rendering embeddings.
#[derive(Error, Debug)]
pub enum ProjectionError {
    /// Not enough samples for the requested projection.
    #[error("insufficient data: {samples} samples cannot support a {target_dim}-dimensional projection")]
    InsufficientData { samples: usize, target_dim: usize },

    /// Rows of the input matrix differ in length.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Point and label counts differ.
    #[error("arity mismatch: {points} points but {labels} labels")]
    ArityMismatch { points: usize, labels: usize },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
