//! Embedding providers.
//!
//! Providers wrap a hosted feature-extraction endpoint that maps a
//! single text to a fixed-length numeric vector.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Request for generating an embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Text to embed.
    pub text: String,

    /// Model to use (provider-specific). Falls back to the provider default.
    pub model: Option<String>,
}

impl EmbeddingRequest {
    /// Create a new embedding request.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Response from embedding generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The generated embedding.
    pub embedding: Embedding,

    /// Model used to generate the embedding.
    pub model: String,

    /// Dimension of the embedding.
    pub dimension: usize,
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;

    /// Generate an embedding for the given text.
    ///
    /// Each call is a fresh request: no retry, no caching.
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Check if the provider is available (API token set, etc.).
    fn is_available(&self) -> bool;
}

/// Hugging Face Inference API embedding provider.
///
/// Calls the feature-extraction pipeline for sentence-transformer
/// models. Credentials and the target model are fixed at construction.
pub struct HuggingFaceProvider {
    /// API token.
    api_token: Option<String>,

    /// API base URL (up to and including the models segment).
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Default model.
    default_model: String,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face provider.
    ///
    /// The API token defaults to the `HF_TOKEN` environment variable.
    pub fn new() -> Self {
        Self {
            api_token: std::env::var("HF_TOKEN").ok(),
            base_url: "https://router.huggingface.co/hf-inference/models".to_string(),
            client: reqwest::Client::new(),
            default_model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
        }
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

impl Default for HuggingFaceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let api_token = self
            .api_token
            .as_ref()
            .ok_or(EmbeddingError::ProviderNotConfigured)?;

        let model = request.model.unwrap_or_else(|| self.default_model.clone());

        debug!("Generating embedding with model: {model}");

        let body = serde_json::json!({
            "inputs": request.text,
        });

        let response = self
            .client
            .post(format!(
                "{}/{model}/pipeline/feature-extraction",
                self.base_url
            ))
            .header("Authorization", format!("Bearer {api_token}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(EmbeddingError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest(format!(
                "API error: {error_text}"
            )));
        }

        let body_text = response.text().await?;
        let payload: FeatureExtractionPayload = serde_json::from_str(&body_text)
            .map_err(|_| EmbeddingError::InvalidResponse("not a numeric vector".to_string()))?;
        let embedding = payload.into_embedding()?;

        let dimension = embedding.len();
        info!("Generated embedding with {dimension} dimensions");

        Ok(EmbeddingResponse {
            embedding,
            model,
            dimension,
        })
    }

    fn is_available(&self) -> bool {
        self.api_token.is_some()
    }
}

/// Feature-extraction response body.
///
/// Sentence-transformer models return a flat vector for a single
/// input; some models wrap the vector in a one-row matrix instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureExtractionPayload {
    Flat(Vec<f32>),
    Nested(Vec<Vec<f32>>),
}

impl FeatureExtractionPayload {
    fn into_embedding(self) -> Result<Embedding> {
        match self {
            Self::Flat(embedding) => Ok(embedding),
            Self::Nested(mut rows) if rows.len() == 1 => Ok(rows.remove(0)),
            Self::Nested(rows) => Err(EmbeddingError::InvalidResponse(format!(
                "expected a single vector, got {} rows",
                rows.len()
            ))),
        }
    }
}
