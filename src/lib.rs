//! StudyMate core library.
//!
//! A document question-answering study aid: extracted text is split into
//! overlapping passages, indexed by sentence embeddings, and searched by
//! cosine similarity to ground answers, quizzes, and translations produced
//! by a locally hosted language model.

pub mod config;
pub mod embeddings;
pub mod extract;
pub mod history;
pub mod llm;
pub mod qa;
pub mod quiz;
pub mod rag;
pub mod translator;
