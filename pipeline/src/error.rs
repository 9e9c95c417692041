//! Error types for the pipeline crate.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] vectorlens_embeddings::EmbeddingError),

    /// Projection or rendering error.
    #[error("projection error: {0}")]
    Projection(#[from] vectorlens_projection::ProjectionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
