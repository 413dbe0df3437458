//! Retrieval engine: passage chunking, embedding-backed semantic indexing,
//! and top-k similarity search.

use thiserror::Error;

use crate::embeddings::EmbeddingError;
use crate::extract::ExtractionError;

mod chunker;
mod index;
mod models;

pub use chunker::{chunk_text, ChunkConfig, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
pub use index::{DocumentIndex, FlatIndex, ScoredMatch, VectorSearch};
pub use models::ScoredPassage;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("Invalid chunker configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Cannot build an index from an empty passage sequence")]
    EmptyCorpus,

    #[error("Index contains no passages")]
    EmptyIndex,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

pub type Result<T> = std::result::Result<T, RagError>;
