//! Application configuration, loaded from an optional `studymate.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embeddings::EmbeddingConfig;
use crate::llm::LlmConfig;
use crate::rag::ChunkConfig;

/// Config file looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "studymate.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where quizzes and history live; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
    pub chunking: ChunkConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load configuration from an explicit path, or from `studymate.toml`
    /// in the working directory when present. Absent files mean defaults;
    /// an explicit path that cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Resolve the data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|p| p.join("studymate"))
            .ok_or(ConfigError::DataDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.overlap, 50);
        assert_eq!(config.embedding.model, "all-minilm");
        assert_eq!(config.llm.model, "granite3.3:2b");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let raw = r#"
            data_dir = "/tmp/studymate"

            [chunking]
            chunk_size = 800

            [llm]
            model = "llama3.2:3b"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/studymate")));
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.chunking.overlap, 50);
        assert_eq!(config.llm.model, "llama3.2:3b");
        assert_eq!(config.llm.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studymate.toml");
        fs::write(&path, "[embedding]\nmodel = \"nomic-embed-text\"\ndimensions = 768\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.embedding.model, "nomic-embed-text");
        assert_eq!(config.embedding.dimensions, Some(768));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/studymate.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
