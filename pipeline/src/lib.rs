//! # Pipeline
//!
//! This crate wires the embedding and projection crates into the two
//! end-to-end flows:
//!
//! - **Search**: texts → corpus matrix → ranked (label, score) list
//! - **Visualization**: texts → corpus matrix → 2-D projection →
//!   standalone HTML scatter plot
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vectorlens_pipeline::SemanticPipeline;
//!
//! let pipeline = SemanticPipeline::builder()
//!     .with_api_token(token)
//!     .build();
//!
//! let corpus = pipeline.embed_corpus(&texts).await?;
//! let ranked = pipeline.search("Car", &corpus).await?;
//! pipeline.visualize(&corpus, "embedding-plot.html")?;
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{EmbeddingConfig, PipelineConfig, PlotConfig};
pub use engine::{PipelineBuilder, SemanticPipeline};
pub use error::{PipelineError, Result};

// Re-export from dependencies for convenience
pub use vectorlens_embeddings::{Corpus, EmbeddingProvider, RankedMatch, SimilarityMetric};
pub use vectorlens_projection::{ProjectedPoint, ScatterPlot};
