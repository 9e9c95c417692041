//! Semantic pipeline implementation.

use std::path::Path;

use tracing::{debug, info};

use vectorlens_embeddings::{
    Corpus, CorpusFetcher, Embedding, EmbeddingProvider, HuggingFaceProvider, RankedMatch,
    similarity,
};
use vectorlens_projection::{ProjectedPoint, ScatterPlot, pca};

use crate::config::PipelineConfig;
use crate::error::Result;

/// End-to-end semantic pipeline.
///
/// Coordinates the per-run flow: embed an ordered corpus of texts,
/// then either rank the corpus against a query or project it to 2-D
/// and render a scatter-plot artifact. A single logical thread of
/// control; embedding fetches run one at a time in input order.
pub struct SemanticPipeline<P> {
    /// Configuration.
    config: PipelineConfig,

    /// Corpus fetcher over the configured provider.
    fetcher: CorpusFetcher<P>,
}

impl SemanticPipeline<HuggingFaceProvider> {
    /// Create a pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Create a pipeline from configuration, constructing the default
    /// Hugging Face provider from the embedding settings.
    pub fn new(config: PipelineConfig) -> Self {
        let mut provider = HuggingFaceProvider::new();
        if let Some(token) = &config.embedding.api_token {
            provider = provider.with_api_token(token.clone());
        }
        if let Some(url) = &config.embedding.base_url {
            provider = provider.with_base_url(url.clone());
        }
        if let Some(model) = &config.embedding.model {
            provider = provider.with_model(model.clone());
        }

        Self::with_provider(config, provider)
    }
}

impl<P: EmbeddingProvider> SemanticPipeline<P> {
    /// Create a pipeline over a custom provider.
    pub fn with_provider(config: PipelineConfig, provider: P) -> Self {
        let mut fetcher = CorpusFetcher::new(provider);
        if let Some(model) = &config.embedding.model {
            fetcher = fetcher.with_model(model.clone());
        }

        Self { config, fetcher }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Embed an ordered list of texts into an index-aligned corpus.
    ///
    /// Sequential, fail-fast: any provider error aborts the batch and
    /// partial results are discarded.
    pub async fn embed_corpus(&self, texts: &[String]) -> Result<Corpus> {
        info!("Embedding corpus of {} texts", texts.len());
        Ok(self.fetcher.fetch_all(texts).await?)
    }

    /// Rank the corpus against an already-embedded query vector.
    pub fn rank_vector(&self, query: &Embedding, corpus: &Corpus) -> Result<Vec<RankedMatch>> {
        Ok(similarity::rank(query, corpus, self.config.metric)?)
    }

    /// Embed the query text and rank the corpus against it.
    pub async fn search(&self, query: &str, corpus: &Corpus) -> Result<Vec<RankedMatch>> {
        debug!("Searching corpus for: {query}");
        let query_embedding = self.fetcher.fetch_query(query).await?;
        self.rank_vector(&query_embedding, corpus)
    }

    /// Embed the texts, then rank them against the query.
    pub async fn search_texts(&self, query: &str, texts: &[String]) -> Result<Vec<RankedMatch>> {
        let corpus = self.embed_corpus(texts).await?;
        self.search(query, &corpus).await
    }

    /// Project the corpus to 2-D.
    pub fn project(&self, corpus: &Corpus) -> Result<Vec<ProjectedPoint>> {
        Ok(pca::project_2d(corpus.rows())?)
    }

    /// Project the corpus to 2-D and write a scatter-plot artifact.
    ///
    /// The artifact at `path` is overwritten if it already exists.
    pub fn visualize(&self, corpus: &Corpus, path: impl AsRef<Path>) -> Result<()> {
        let points = self.project(corpus)?;

        let plot = ScatterPlot::new(points, corpus.labels().to_vec())?
            .with_title(self.config.plot.title.clone());
        plot.write_html(&path)?;

        info!(
            "Visualized {} corpus items at {}",
            corpus.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Embed the texts, then write their 2-D visualization.
    pub async fn visualize_texts(&self, texts: &[String], path: impl AsRef<Path>) -> Result<Corpus> {
        let corpus = self.embed_corpus(texts).await?;
        self.visualize(&corpus, path)?;
        Ok(corpus)
    }
}

/// Builder for the semantic pipeline.
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.embedding.model = Some(model.into());
        self
    }

    /// Set the provider API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.config.embedding.api_token = Some(token.into());
        self
    }

    /// Set the provider base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.embedding.base_url = Some(url.into());
        self
    }

    /// Set the similarity metric.
    pub fn with_metric(mut self, metric: vectorlens_embeddings::SimilarityMetric) -> Self {
        self.config.metric = metric;
        self
    }

    /// Set the plot title.
    pub fn with_plot_title(mut self, title: impl Into<String>) -> Self {
        self.config.plot.title = title.into();
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> SemanticPipeline<HuggingFaceProvider> {
        SemanticPipeline::new(self.config)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
