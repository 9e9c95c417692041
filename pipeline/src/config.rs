//! Configuration for the semantic pipeline.

use serde::{Deserialize, Serialize};

use vectorlens_embeddings::SimilarityMetric;

/// Configuration for the semantic pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Similarity metric used for ranking.
    pub metric: SimilarityMetric,

    /// Plot rendering configuration.
    pub plot: PlotConfig,
}

impl PipelineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }

    /// Set the similarity metric.
    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the plot configuration.
    pub fn with_plot(mut self, config: PlotConfig) -> Self {
        self.plot = config;
        self
    }
}

/// Configuration for the embedding provider.
///
/// Credentials and the model identifier are plain settings handed to
/// the client at construction, never global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model to use for embeddings. `None` uses the provider default.
    pub model: Option<String>,

    /// API token. `None` falls back to the provider's environment
    /// variable lookup.
    pub api_token: Option<String>,

    /// Override for the provider base URL.
    pub base_url: Option<String>,
}

impl EmbeddingConfig {
    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

/// Configuration for plot rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Title shown above the scatter plot.
    pub title: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "2D Embedding Visualization (PCA)".to_string(),
        }
    }
}
