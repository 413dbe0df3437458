//! Passage chunking for semantic indexing.
//!
//! Splits extracted document text into overlapping fixed-size passages
//! suitable for embedding and for display as supporting evidence.

use serde::{Deserialize, Serialize};

use super::{RagError, Result};

/// Default passage size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap between neighboring passages in characters.
pub const DEFAULT_OVERLAP: usize = 50;

/// Chunking parameters, both measured in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Forward progress per passage, in characters.
    fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RagError::InvalidConfiguration(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(RagError::InvalidConfiguration(format!(
                "overlap ({}) must be smaller than chunk size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Split text into overlapping passages using a sliding window.
///
/// Offsets are measured in characters, not bytes, so multi-byte text never
/// splits inside a code point. Splits are pure offset arithmetic; sentence
/// and paragraph boundaries are not considered. The final passage runs to
/// the end of the text and may be shorter than `chunk_size`; empty input
/// yields an empty sequence. A configuration whose overlap would prevent
/// forward progress is rejected.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Result<Vec<String>> {
    config.validate()?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Byte offset of every char boundary, including the end of the text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let total_chars = boundaries.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < total_chars {
        let end = (start + config.chunk_size).min(total_chars);
        chunks.push(text[boundaries[start]..boundaries[end]].to_string());
        if end == total_chars {
            break;
        }
        start += config.step();
    }

    Ok(chunks)
}
