//! Question answering over an indexed document.
//!
//! Retrieves the passages most relevant to a question and forwards them,
//! together with the question, to the completion service.

use thiserror::Error;

use crate::embeddings::EmbeddingClient;
use crate::llm::{LlmClient, LlmError};
use crate::rag::{DocumentIndex, RagError, ScoredPassage};

/// Default number of passages forwarded as context.
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Error, Debug)]
pub enum QaError {
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] RagError),

    #[error("Language model call failed: {0}")]
    Llm(#[from] LlmError),
}

pub type Result<T> = std::result::Result<T, QaError>;

/// An answer together with the passages it was grounded on.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<ScoredPassage>,
}

/// Answer a question about an indexed document.
///
/// The `top_k` most similar passages become the prompt context; the
/// passages are also returned so callers can display them as evidence.
pub fn answer_question(
    index: &DocumentIndex,
    embedder: &dyn EmbeddingClient,
    llm: &dyn LlmClient,
    question: &str,
    top_k: usize,
) -> Result<Answer> {
    let sources = index.query(embedder, question, top_k)?;
    let prompt = build_prompt(&sources, question);
    let text = llm.complete(&prompt)?;

    Ok(Answer { text, sources })
}

fn build_prompt(sources: &[ScoredPassage], question: &str) -> String {
    let context = sources
        .iter()
        .map(|passage| passage.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Answer the question based on the context:\n\n{context}\n\nQuestion: {question}")
}
