use std::path::Path;

use anyhow::{Context, Result};

use studymate_lib::config::AppConfig;
use studymate_lib::embeddings::OllamaEmbeddings;
use studymate_lib::extract::{PlainTextExtractor, TextExtractor};
use studymate_lib::history::HistoryStore;
use studymate_lib::llm::OllamaClient;
use studymate_lib::quiz::QuizStore;
use studymate_lib::rag::{chunk_text, DocumentIndex};

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub embeddings: OllamaEmbeddings,
    pub llm: OllamaClient,
    pub history: HistoryStore,
    pub quizzes: QuizStore,
}

impl App {
    /// Initialize from configuration. The model clients are constructed
    /// once here and shared by every command.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).context("Failed to load configuration")?;
        let data_dir = config
            .data_dir()
            .context("Failed to resolve data directory")?;

        let embeddings = OllamaEmbeddings::new(&config.embedding);
        let llm = OllamaClient::new(&config.llm);
        let history = HistoryStore::new(&data_dir);
        let quizzes = QuizStore::new(&data_dir);

        Ok(Self {
            config,
            embeddings,
            llm,
            history,
            quizzes,
        })
    }

    /// Extract a document's full text.
    pub fn extract_text(&self, file: &Path) -> Result<String> {
        PlainTextExtractor
            .extract(file)
            .with_context(|| format!("Failed to extract text from {}", file.display()))
    }

    /// Extract a document and split it into passages.
    pub fn load_passages(&self, file: &Path) -> Result<Vec<String>> {
        let text = self.extract_text(file)?;
        let passages = chunk_text(&text, &self.config.chunking)?;
        anyhow::ensure!(!passages.is_empty(), "{} contains no text", file.display());
        Ok(passages)
    }

    /// Extract, chunk, and index a document.
    pub fn index_document(&self, file: &Path) -> Result<DocumentIndex> {
        let passages = self.load_passages(file)?;
        DocumentIndex::build(&self.embeddings, passages)
            .context("Failed to build the semantic index")
    }

    /// Document display name used in history entries.
    pub fn document_name(file: &Path) -> String {
        file.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string())
    }
}
