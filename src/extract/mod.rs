//! Document text extraction.
//!
//! Turning a document file into raw character text is an upstream concern;
//! this module only fixes the contract the retrieval engine depends on and
//! ships a plain-text implementation. Extraction failures pass through the
//! engine unchanged.

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unreadable document {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Extracts the full character text of a document file.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Reads UTF-8 text files verbatim.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|e| ExtractionError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
