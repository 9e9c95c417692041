//! # Embeddings
//!
//! This crate turns text into dense vectors via a hosted inference
//! provider and ranks candidate vectors against a query.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors using a
//!   remote feature-extraction endpoint
//! - **Corpus Fetching**: Embed an ordered list of texts into an
//!   index-aligned matrix
//! - **Similarity Ranking**: Score and order candidates against a query
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Embeddings Pipeline                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► CorpusFetcher ──► Corpus                 │
//! │       │                                    │                    │
//! │       ▼                                    ▼                    │
//! │  HuggingFace API                    rank(query, corpus)         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod corpus;
pub mod error;
pub mod provider;
pub mod similarity;

pub use corpus::{Corpus, CorpusFetcher};
pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, HuggingFaceProvider};
pub use similarity::{RankedMatch, SimilarityMetric, cosine_similarity, dot_product, rank};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 384; // all-MiniLM-L6-v2
