//! Embedding generation against a locally hosted Ollama-compatible service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Expected {expected} embedding vectors, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding response contained no vectors")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Batch embedding service.
///
/// Implementations return one vector per input text, in input order, and
/// must be deterministic for a fixed model. Expensive setup (model load,
/// connection pool) belongs in construction: a client is created once at
/// process start and shared by every build and query call.
pub trait EmbeddingClient {
    /// Embed a batch of texts into equal-length vectors.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Identifier of the underlying embedding model.
    fn model_name(&self) -> &str;

    /// Vector width, when known up front.
    fn dimensions(&self) -> Option<usize>;
}

/// Connection settings for the embedding service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Model identifier (e.g. "all-minilm")
    pub model: String,
    /// Expected vector width; responses are checked against it when set
    pub dimensions: Option<usize>,
    /// Base URL of the Ollama server
    pub base_url: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "all-minilm".to_string(),
            dimensions: Some(384),
            base_url: "http://localhost:11434".to_string(),
        }
    }
}

/// Embeddings via the Ollama `/api/embed` endpoint.
pub struct OllamaEmbeddings {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    dimensions: Option<usize>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbeddings {
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        }
    }

    fn embed_endpoint(&self) -> String {
        format!("{}/api/embed", self.base_url)
    }
}

impl EmbeddingClient for OllamaEmbeddings {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        log::debug!(
            "Embedding {} texts with model {}",
            texts.len(),
            self.model
        );

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(self.embed_endpoint())
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(EmbeddingError::Api { status, message });
        }

        let body: EmbedResponse = response.json()?;

        if body.embeddings.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: body.embeddings.len(),
            });
        }

        if let Some(expected) = self.dimensions {
            for vector in &body.embeddings {
                if vector.len() != expected {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected,
                        actual: vector.len(),
                    });
                }
            }
        }

        Ok(body.embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}
