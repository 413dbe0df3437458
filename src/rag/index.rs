//! In-memory vector index for semantic search.
//!
//! Passages are embedded once at build time, L2-normalized, and stored in a
//! flat structure searched by exact inner product. For one document's worth
//! of passages an exact scan beats an approximate index: there is no recall
//! to tune and nothing to mis-configure.

use crate::embeddings::{EmbeddingClient, EmbeddingError};

use super::models::ScoredPassage;
use super::{RagError, Result};

/// A ranked match from a nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch {
    pub ordinal: usize,
    pub score: f32,
}

/// Nearest-neighbor search over unit-length vectors.
///
/// Implementations return at most `k` matches ranked by descending inner
/// product; equal scores rank the lower ordinal first.
pub trait VectorSearch {
    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rank the indexed vectors against `query` and return the top `k`.
    fn search(&self, query: &[f32], k: usize) -> Vec<ScoredMatch>;
}

/// Flat brute-force vector store.
///
/// Insert-only; a vector's ordinal is its insertion position.
pub struct FlatIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Append a vector to the store.
    pub fn add(&mut self, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(RagError::Embedding(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }));
        }
        self.vectors.push(vector);
        Ok(())
    }
}

impl VectorSearch for FlatIndex {
    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn search(&self, query: &[f32], k: usize) -> Vec<ScoredMatch> {
        let mut scored: Vec<ScoredMatch> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(ordinal, vector)| ScoredMatch {
                ordinal,
                score: inner_product(query, vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.ordinal.cmp(&b.ordinal))
        });
        scored.truncate(k);
        scored
    }
}

/// Semantic index over one document's passages.
///
/// Immutable once built: queries take `&self`, so reads may run
/// concurrently without synchronization. Ordinal `i` refers to passage `i`,
/// embedding row `i`, and stored vector `i` for the lifetime of the index.
pub struct DocumentIndex {
    passages: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    index: FlatIndex,
}

impl DocumentIndex {
    /// Embed and index an ordered passage sequence.
    ///
    /// All passages are embedded in a single batch call and L2-normalized
    /// so that inner product equals cosine similarity. Building from an
    /// empty sequence fails; a failed build publishes nothing.
    pub fn build(embedder: &dyn EmbeddingClient, passages: Vec<String>) -> Result<Self> {
        if passages.is_empty() {
            return Err(RagError::EmptyCorpus);
        }

        let mut embeddings = embedder.embed(&passages)?;
        if embeddings.len() != passages.len() {
            return Err(RagError::Embedding(EmbeddingError::CountMismatch {
                expected: passages.len(),
                actual: embeddings.len(),
            }));
        }

        for vector in &mut embeddings {
            normalize(vector);
        }

        let mut index = FlatIndex::new(embeddings[0].len());
        for vector in &embeddings {
            index.add(vector.clone())?;
        }

        log::debug!("Built index over {} passages", passages.len());

        Ok(Self {
            passages,
            embeddings,
            index,
        })
    }

    /// Number of indexed passages.
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// The passage sequence the index was built from.
    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    /// The normalized embedding matrix, row `i` for passage `i`.
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Return the `k` passages most similar to `query`, best match first.
    ///
    /// The query is embedded with the same client the index was built with
    /// and normalized before the search. `k` is clamped to the number of
    /// indexed passages; `k == 0` is an error.
    pub fn query(
        &self,
        embedder: &dyn EmbeddingClient,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredPassage>> {
        if k == 0 {
            return Err(RagError::InvalidArgument(
                "k must be a positive integer".to_string(),
            ));
        }
        if self.passages.is_empty() {
            return Err(RagError::EmptyIndex);
        }

        let query_texts = [query.to_string()];
        let mut query_embedding = self.embed_query(embedder, &query_texts)?;

        if query_embedding.len() != self.index.dimensions() {
            return Err(RagError::Embedding(EmbeddingError::DimensionMismatch {
                expected: self.index.dimensions(),
                actual: query_embedding.len(),
            }));
        }

        normalize(&mut query_embedding);

        let k = k.min(self.passages.len());
        let matches = self.index.search(&query_embedding, k);

        Ok(matches
            .into_iter()
            .map(|m| ScoredPassage {
                ordinal: m.ordinal,
                content: self.passages[m.ordinal].clone(),
                score: m.score,
            })
            .collect())
    }

    fn embed_query(
        &self,
        embedder: &dyn EmbeddingClient,
        query_texts: &[String],
    ) -> Result<Vec<f32>> {
        embedder
            .embed(query_texts)?
            .into_iter()
            .next()
            .ok_or(RagError::Embedding(EmbeddingError::EmptyResponse))
    }

    #[cfg(test)]
    fn empty_for_tests() -> Self {
        Self {
            passages: Vec::new(),
            embeddings: Vec::new(),
            index: FlatIndex::new(0),
        }
    }
}

/// L2-normalize a vector in place. Zero vectors are left untouched.
fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
