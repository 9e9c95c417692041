//! # Projection
//!
//! This crate compresses high-dimensional embeddings to two dimensions
//! and renders the result as a self-contained scatter-plot document.
//!
//! ## Features
//!
//! - **PCA**: Project a matrix onto its leading principal components
//! - **Rendering**: Emit a standalone HTML scatter plot of the
//!   projected points with their source labels
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Projection Pipeline                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  matrix ──► project_2d ──► ProjectedPoint ──► ScatterPlot       │
//! │                                                   │             │
//! │                                                   ▼             │
//! │                                             plot.html           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod pca;
pub mod plot;

pub use error::{ProjectionError, Result};
pub use pca::{ProjectedPoint, project, project_2d};
pub use plot::ScatterPlot;
