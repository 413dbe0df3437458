//! Completion calls against a locally hosted Ollama-compatible service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Language model API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Language model returned an empty response")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, LlmError>;

/// Synchronous, non-streaming completion service.
pub trait LlmClient {
    /// Send a prompt and return the model's full reply.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}

/// Connection settings for the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier (e.g. "granite3.3:2b")
    pub model: String,
    /// Base URL of the Ollama server
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "granite3.3:2b".to_string(),
            base_url: "http://localhost:11434".to_string(),
        }
    }
}

/// Completions via the Ollama `/api/generate` endpoint.
pub struct OllamaClient {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn generate_endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl LlmClient for OllamaClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        log::debug!(
            "Sending {} char prompt to model {}",
            prompt.len(),
            self.model
        );

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.generate_endpoint())
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        let body: GenerateResponse = response.json()?;

        if body.response.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(body.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
