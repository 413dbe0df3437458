//! File-backed question and answer history.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// History file name inside the data directory.
const HISTORY_FILE: &str = "search_history.json";

/// Entries retained after trimming the oldest.
const MAX_ENTRIES: usize = 100;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    pub document: String,
    pub timestamp: DateTime<Utc>,
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(HISTORY_FILE),
        }
    }

    /// Load the history. A missing or unparsable file loads as empty.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Ignoring unparsable history file: {e}");
                Vec::new()
            }
        }
    }

    /// Record an answered question and return the updated history.
    ///
    /// Exact duplicates (same question, answer, and document) are skipped;
    /// the history keeps only the most recent `MAX_ENTRIES` entries.
    pub fn add(&self, question: &str, answer: &str, document: &str) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load();

        let duplicate = entries.iter().any(|entry| {
            entry.question == question && entry.answer == answer && entry.document == document
        });

        if !duplicate {
            entries.push(HistoryEntry {
                question: question.to_string(),
                answer: answer.to_string(),
                document: document.to_string(),
                timestamp: Utc::now(),
            });

            if entries.len() > MAX_ENTRIES {
                entries.drain(..entries.len() - MAX_ENTRIES);
            }

            self.save(&entries)?;
        }

        Ok(entries)
    }

    /// History entries for one document.
    pub fn for_document(&self, document: &str) -> Vec<HistoryEntry> {
        self.load()
            .into_iter()
            .filter(|entry| entry.document == document)
            .collect()
    }

    /// Remove the history file.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        store.add("What is ATP?", "Energy currency.", "bio.pdf").unwrap();

        let entries = store.load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question, "What is ATP?");
        assert_eq!(entries[0].document, "bio.pdf");
    }

    #[test]
    fn test_exact_duplicates_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        store.add("Q", "A", "doc.pdf").unwrap();
        let entries = store.add("Q", "A", "doc.pdf").unwrap();
        assert_eq!(entries.len(), 1);

        // Same question against a different document is a new entry.
        let entries = store.add("Q", "A", "other.pdf").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_history_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        for i in 0..105 {
            store.add(&format!("Q{i}"), "A", "doc.pdf").unwrap();
        }

        let entries = store.load();
        assert_eq!(entries.len(), 100);
        assert_eq!(entries[0].question, "Q5");
        assert_eq!(entries[99].question, "Q104");
    }

    #[test]
    fn test_for_document_filters() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        store.add("Q1", "A", "bio.pdf").unwrap();
        store.add("Q2", "A", "chem.pdf").unwrap();
        store.add("Q3", "A", "bio.pdf").unwrap();

        let entries = store.for_document("bio.pdf");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.document == "bio.pdf"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        store.add("Q", "A", "doc.pdf").unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());

        // Clearing an already-empty history is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        fs::write(dir.path().join(HISTORY_FILE), "{{{ not json").unwrap();
        assert!(store.load().is_empty());
    }
}
