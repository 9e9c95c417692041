//! Similarity scoring and ranking for embeddings.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::Embedding;
use crate::corpus::Corpus;
use crate::error::{EmbeddingError, Result};

/// Compute the dot product between two embeddings.
///
/// The raw inner product: magnitudes are not normalized away, so
/// longer vectors score higher against everything.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical vectors
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (magnitude_a * magnitude_b))
}

/// Similarity metric used for ranking.
///
/// The default is the raw dot product. Cosine is selectable without
/// changing how ranking itself works.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Unnormalized inner product.
    #[default]
    DotProduct,
    /// Dot product of unit-normalized vectors.
    Cosine,
}

impl SimilarityMetric {
    /// Score a (query, candidate) pair under this metric.
    pub fn score(&self, query: &[f32], candidate: &[f32]) -> Result<f32> {
        match self {
            Self::DotProduct => dot_product(query, candidate),
            Self::Cosine => cosine_similarity(query, candidate),
        }
    }
}

/// A ranked candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    /// Position of the candidate in the corpus.
    pub index: usize,

    /// Label of the candidate.
    pub label: String,

    /// Similarity score against the query.
    pub score: f32,
}

/// Rank every corpus row against the query.
///
/// Returns all candidates in descending score order; equal scores keep
/// their original corpus order (stable sort). Fails with
/// [`EmbeddingError::DimensionMismatch`] if the query length differs
/// from the corpus dimension. Pure and deterministic: no I/O.
pub fn rank(query: &Embedding, corpus: &Corpus, metric: SimilarityMetric) -> Result<Vec<RankedMatch>> {
    if !corpus.is_empty() && query.len() != corpus.dimension() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: corpus.dimension(),
            actual: query.len(),
        });
    }

    let mut matches = Vec::with_capacity(corpus.len());
    for (index, (label, row)) in corpus.labels().iter().zip(corpus.rows()).enumerate() {
        let score = metric.score(query, row)?;
        matches.push(RankedMatch {
            index,
            label: label.clone(),
            score,
        });
    }

    // sort_by is stable, so ties keep corpus order.
    matches.sort_by(|a, b| OrderedFloat(b.score).cmp(&OrderedFloat(a.score)));

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn corpus(items: &[(&str, Vec<f32>)]) -> Corpus {
        let labels = items.iter().map(|(l, _)| l.to_string()).collect();
        let rows = items.iter().map(|(_, v)| v.clone()).collect();
        Corpus::new(labels, rows).unwrap()
    }

    #[test]
    fn test_dot_product() {
        let score = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert!((score - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_is_unnormalized() {
        // A longer vector in the same direction scores higher.
        let query = vec![1.0, 0.0];
        let short = dot_product(&query, &[1.0, 0.0]).unwrap();
        let long = dot_product(&query, &[5.0, 0.0]).unwrap();
        assert!(long > short);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[-1.0, 0.0, 0.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_metric_dimension_mismatch() {
        for metric in [SimilarityMetric::DotProduct, SimilarityMetric::Cosine] {
            let err = metric.score(&[1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap_err();
            assert!(matches!(
                err,
                EmbeddingError::DimensionMismatch {
                    expected: 2,
                    actual: 3
                }
            ));
        }
    }

    #[test]
    fn test_rank_descending() {
        let corpus = corpus(&[
            ("low", vec![0.1, 0.0]),
            ("high", vec![0.9, 0.0]),
            ("mid", vec![0.5, 0.0]),
        ]);
        let query = vec![1.0, 0.0];

        let ranked = rank(&query, &corpus, SimilarityMetric::DotProduct).unwrap();

        let labels: Vec<&str> = ranked.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["high", "mid", "low"]);
        assert!(ranked[0].score > ranked[1].score);
        assert!(ranked[1].score > ranked[2].score);
    }

    #[test]
    fn test_rank_ties_keep_corpus_order() {
        let corpus = corpus(&[
            ("Car", vec![1.0, 0.0, 0.0]),
            ("Tiger", vec![0.0, 1.0, 0.0]),
            ("Fish", vec![0.0, 0.0, 1.0]),
        ]);
        let query = vec![1.0, 0.0, 0.0];

        let ranked = rank(&query, &corpus, SimilarityMetric::DotProduct).unwrap();

        assert_eq!(ranked[0].label, "Car");
        assert!((ranked[0].score - 1.0).abs() < 1e-6);
        // Tiger and Fish both score 0.0; Tiger comes first in the corpus.
        assert_eq!(ranked[1].label, "Tiger");
        assert_eq!(ranked[2].label, "Fish");
        assert_eq!(ranked[1].index, 1);
        assert_eq!(ranked[2].index, 2);
    }

    #[test]
    fn test_rank_query_dimension_mismatch() {
        let corpus = corpus(&[("a", vec![1.0, 0.0, 0.0])]);
        let err = rank(&vec![1.0, 0.0], &corpus, SimilarityMetric::DotProduct).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_rank_empty_corpus() {
        let corpus = Corpus::new(Vec::new(), Vec::new()).unwrap();
        let ranked = rank(&vec![1.0], &corpus, SimilarityMetric::DotProduct).unwrap();
        assert!(ranked.is_empty());
    }
}
