//! Data models for retrieval results.

use serde::{Deserialize, Serialize};

/// A passage returned by a similarity query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPassage {
    /// Position of the passage in the chunker's output sequence
    pub ordinal: usize,
    /// The passage text
    pub content: String,
    /// Inner-product similarity against the query (higher is more similar)
    pub score: f32,
}
