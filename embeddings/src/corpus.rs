//! Corpus fetching: embed an ordered list of texts into a matrix.

use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::provider::{EmbeddingProvider, EmbeddingRequest};

/// An embedded corpus: labels and their index-aligned vectors.
///
/// Row *i* is the embedding of label *i*. Built once per run and
/// read-only afterwards. Every row has the same dimension.
#[derive(Debug, Clone)]
pub struct Corpus {
    labels: Vec<String>,
    rows: Vec<Embedding>,
    dimension: usize,
}

impl Corpus {
    /// Build a corpus from pre-computed rows.
    ///
    /// Fails with [`EmbeddingError::DimensionMismatch`] if the label
    /// and row counts differ or the rows are not all the same length.
    pub fn new(labels: Vec<String>, rows: Vec<Embedding>) -> Result<Self> {
        if labels.len() != rows.len() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: labels.len(),
                actual: rows.len(),
            });
        }

        let dimension = rows.first().map(Vec::len).unwrap_or(0);
        for row in &rows {
            if row.len() != dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dimension,
                    actual: row.len(),
                });
            }
        }

        Ok(Self {
            labels,
            rows,
            dimension,
        })
    }

    /// Number of items in the corpus.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dimension shared by every row (0 for an empty corpus).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The labels, in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The embedding rows, index-aligned with the labels.
    pub fn rows(&self) -> &[Embedding] {
        &self.rows
    }

    /// Get a single (label, row) pair by index.
    pub fn get(&self, index: usize) -> Option<(&str, &Embedding)> {
        Some((self.labels.get(index)?.as_str(), self.rows.get(index)?))
    }
}

/// Fetches embeddings for an ordered list of texts.
///
/// Calls the provider once per text, strictly sequentially in input
/// order. Any single failure aborts the whole batch; partial results
/// are discarded.
pub struct CorpusFetcher<P> {
    provider: P,
    model: Option<String>,
}

impl<P: EmbeddingProvider> CorpusFetcher<P> {
    /// Create a new fetcher over the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            model: None,
        }
    }

    /// Override the model used for every request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Embed every text, preserving input order.
    ///
    /// On success the corpus has exactly one row per text and row *i*
    /// is the embedding of text *i*.
    pub async fn fetch_all(&self, texts: &[String]) -> Result<Corpus> {
        debug!("Fetching embeddings for {} texts", texts.len());

        let mut rows = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let mut request = EmbeddingRequest::new(text.clone());
            if let Some(model) = &self.model {
                request = request.with_model(model.clone());
            }

            let response = self.provider.embed(request).await?;
            debug!(
                "Embedded text {i} ({} dimensions)",
                response.embedding.len()
            );
            rows.push(response.embedding);
        }

        let corpus = Corpus::new(texts.to_vec(), rows)?;
        info!(
            "Fetched corpus of {} embeddings ({} dimensions)",
            corpus.len(),
            corpus.dimension()
        );
        Ok(corpus)
    }

    /// Embed a single query text.
    pub async fn fetch_query(&self, text: &str) -> Result<Embedding> {
        let mut request = EmbeddingRequest::new(text);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }
        Ok(self.provider.embed(request).await?.embedding)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::provider::EmbeddingResponse;

    /// Provider returning canned vectors keyed by input text.
    struct StaticProvider {
        vectors: Vec<(&'static str, Embedding)>,
        calls: AtomicUsize,
    }

    impl StaticProvider {
        fn new(vectors: Vec<(&'static str, Embedding)>) -> Self {
            Self {
                vectors,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        fn default_model(&self) -> &str {
            "static/model"
        }

        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let embedding = self
                .vectors
                .iter()
                .find(|(text, _)| *text == request.text)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| EmbeddingError::ApiRequest(format!("no vector: {}", request.text)))?;

            let dimension = embedding.len();
            Ok(EmbeddingResponse {
                embedding,
                model: "static/model".to_string(),
                dimension,
            })
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order() {
        let provider = StaticProvider::new(vec![
            ("Car", vec![1.0, 0.0, 0.0]),
            ("Tiger", vec![0.0, 1.0, 0.0]),
            ("Fish", vec![0.0, 0.0, 1.0]),
        ]);
        let fetcher = CorpusFetcher::new(provider);

        let corpus = fetcher
            .fetch_all(&texts(&["Car", "Tiger", "Fish"]))
            .await
            .unwrap();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.dimension(), 3);
        assert_eq!(corpus.labels(), &texts(&["Car", "Tiger", "Fish"]));
        assert_eq!(corpus.rows()[1], vec![0.0, 1.0, 0.0]);
        assert_eq!(corpus.get(2), Some(("Fish", &vec![0.0, 0.0, 1.0])));
        assert_eq!(fetcher.provider().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_single_item() {
        let provider = StaticProvider::new(vec![("Car", vec![0.25, 0.75])]);
        let fetcher = CorpusFetcher::new(provider);

        let corpus = fetcher.fetch_all(&texts(&["Car"])).await.unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.dimension(), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_aborts_on_failure() {
        let provider = StaticProvider::new(vec![("Car", vec![1.0, 0.0])]);
        let fetcher = CorpusFetcher::new(provider);

        let err = fetcher
            .fetch_all(&texts(&["Car", "Unknown"]))
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::ApiRequest(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_ragged_rows() {
        let provider = StaticProvider::new(vec![
            ("Car", vec![1.0, 0.0, 0.0]),
            ("Tiger", vec![0.0, 1.0]),
        ]);
        let fetcher = CorpusFetcher::new(provider);

        let err = fetcher
            .fetch_all(&texts(&["Car", "Tiger"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_corpus_rejects_label_row_count_mismatch() {
        let result = Corpus::new(texts(&["a", "b"]), vec![vec![1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::new(Vec::new(), Vec::new()).unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.dimension(), 0);
    }
}
