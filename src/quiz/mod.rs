//! Quiz generation and grading.
//!
//! Questions are generated by prompting the completion service for strict
//! JSON and recovering the payload from replies that wrap it in code fences
//! or prose. Grading is a local comparison against the stored answer key.

use serde::Deserialize;
use thiserror::Error;

use crate::llm::{LlmClient, LlmError};

mod models;
mod storage;

pub use models::{Difficulty, Question, QuestionResult, Quiz, QuizReport};
pub use storage::QuizStore;

/// Upper bound on questions per quiz.
pub const MAX_QUESTIONS: usize = 20;

/// How much of the document is handed to the model as source material.
const MAX_SOURCE_CHARS: usize = 4000;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Language model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Model reply was not a usable quiz: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Quiz not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;

/// The JSON payload the model is asked to produce.
#[derive(Deserialize)]
struct QuizContent {
    quiz_title: String,
    questions: Vec<Question>,
}

/// Generate a multiple-choice quiz from document text.
///
/// `num_questions` is clamped to `1..=MAX_QUESTIONS` and the source text is
/// truncated before prompting. A reply without a parsable, non-empty
/// question list is an `InvalidFormat` error; no placeholder quiz is ever
/// fabricated.
pub fn generate_quiz(
    llm: &dyn LlmClient,
    text: &str,
    difficulty: Difficulty,
    num_questions: usize,
) -> Result<Quiz> {
    let count = num_questions.clamp(1, MAX_QUESTIONS);
    let source = truncate_chars(text, MAX_SOURCE_CHARS);
    let prompt = build_quiz_prompt(source, difficulty, count);

    let reply = llm.complete(&prompt)?;

    let payload = extract_json(&reply)
        .ok_or_else(|| QuizError::InvalidFormat("no JSON object in model reply".to_string()))?;
    let content: QuizContent = serde_json::from_str(&payload)
        .map_err(|e| QuizError::InvalidFormat(format!("malformed quiz JSON: {e}")))?;

    if content.questions.is_empty() {
        return Err(QuizError::InvalidFormat(
            "quiz contained no questions".to_string(),
        ));
    }

    log::info!(
        "Generated {} {} questions",
        content.questions.len(),
        difficulty
    );

    Ok(Quiz::new(content.quiz_title, content.questions))
}

/// Grade a quiz attempt. `answers[i]` is the letter chosen for question
/// `i`; missing answers count as incorrect.
pub fn evaluate(quiz: &Quiz, answers: &[String]) -> QuizReport {
    let mut question_results = Vec::with_capacity(quiz.questions.len());
    let mut correct_answers = 0;

    for (i, question) in quiz.questions.iter().enumerate() {
        let user_answer = answers
            .get(i)
            .map(|a| a.trim().to_lowercase())
            .unwrap_or_default();
        let correct_answer = question.correct_answer.to_lowercase();
        let is_correct = user_answer == correct_answer;

        if is_correct {
            correct_answers += 1;
        }

        question_results.push(QuestionResult {
            question: question.question.clone(),
            user_answer,
            correct_answer,
            is_correct,
            explanation: question
                .explanation
                .clone()
                .unwrap_or_else(|| "No explanation provided.".to_string()),
        });
    }

    let total_questions = quiz.questions.len();
    let score_percentage = if total_questions > 0 {
        correct_answers as f32 / total_questions as f32 * 100.0
    } else {
        0.0
    };

    QuizReport {
        total_questions,
        correct_answers,
        incorrect_answers: total_questions - correct_answers,
        score_percentage,
        question_results,
    }
}

fn build_quiz_prompt(source: &str, difficulty: Difficulty, count: usize) -> String {
    format!(
        r#"IMPORTANT: Generate {count} {difficulty}-level multiple choice questions based EXCLUSIVELY on the following text content.

Text content to base questions on:
{source}

Format your response as JSON with this exact structure:
{{
    "quiz_title": "Quiz Based on Document Content",
    "questions": [
        {{
            "question": "Specific question based on the text",
            "options": {{
                "a": "Option A that relates to text",
                "b": "Option B that relates to text",
                "c": "Option C that relates to text",
                "d": "Option D that relates to text"
            }},
            "correct_answer": "a",
            "explanation": "Brief explanation referencing the specific text content"
        }}
    ]
}}"#
    )
}

/// Pull a JSON object out of a model reply that may wrap it in ```json
/// fences, bare fences, or surrounding prose.
fn extract_json(reply: &str) -> Option<String> {
    if let Some((_, rest)) = reply.split_once("```json") {
        let body = rest.split("```").next()?;
        return Some(body.trim().to_string());
    }

    if let Some((_, rest)) = reply.split_once("```") {
        let body = rest.split("```").next()?;
        return Some(body.trim().to_string());
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(reply[start..=end].to_string())
}

/// Truncate to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm;
    use std::collections::BTreeMap;

    struct CannedLlm {
        reply: String,
    }

    impl LlmClient for CannedLlm {
        fn complete(&self, _prompt: &str) -> llm::Result<String> {
            Ok(self.reply.clone())
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    const QUIZ_JSON: &str = r#"{
        "quiz_title": "Cell Biology",
        "questions": [
            {
                "question": "What produces ATP?",
                "options": {"a": "Mitochondria", "b": "Ribosome", "c": "Nucleus", "d": "Membrane"},
                "correct_answer": "a",
                "explanation": "Mitochondria are the site of respiration."
            },
            {
                "question": "What builds proteins?",
                "options": {"a": "Mitochondria", "b": "Ribosome", "c": "Nucleus", "d": "Membrane"},
                "correct_answer": "b"
            }
        ]
    }"#;

    fn sample_quiz() -> Quiz {
        let content: QuizContent = serde_json::from_str(QUIZ_JSON).unwrap();
        Quiz::new(content.quiz_title, content.questions)
    }

    #[test]
    fn test_extract_json_from_json_fence() {
        let reply = format!("Here is your quiz:\n```json\n{QUIZ_JSON}\n```\nEnjoy!");
        let payload = extract_json(&reply).unwrap();
        assert!(payload.starts_with('{'));
        assert!(serde_json::from_str::<QuizContent>(&payload).is_ok());
    }

    #[test]
    fn test_extract_json_from_bare_fence() {
        let reply = format!("```\n{QUIZ_JSON}\n```");
        let payload = extract_json(&reply).unwrap();
        assert!(serde_json::from_str::<QuizContent>(&payload).is_ok());
    }

    #[test]
    fn test_extract_json_from_surrounding_prose() {
        let reply = format!("Sure! {QUIZ_JSON} Let me know if you need more.");
        let payload = extract_json(&reply).unwrap();
        assert!(serde_json::from_str::<QuizContent>(&payload).is_ok());
    }

    #[test]
    fn test_extract_json_without_object_is_none() {
        assert!(extract_json("I could not generate a quiz.").is_none());
    }

    #[test]
    fn test_generate_quiz_parses_model_reply() {
        let llm = CannedLlm {
            reply: format!("```json\n{QUIZ_JSON}\n```"),
        };
        let quiz = generate_quiz(&llm, "source text", Difficulty::Medium, 2).unwrap();
        assert_eq!(quiz.title, "Cell Biology");
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.id.len(), 12);
    }

    #[test]
    fn test_generate_quiz_rejects_malformed_reply() {
        let llm = CannedLlm {
            reply: "{ not valid json".to_string(),
        };
        let result = generate_quiz(&llm, "source text", Difficulty::Easy, 3);
        assert!(matches!(result, Err(QuizError::InvalidFormat(_))));
    }

    #[test]
    fn test_generate_quiz_rejects_empty_question_list() {
        let llm = CannedLlm {
            reply: r#"{"quiz_title": "Empty", "questions": []}"#.to_string(),
        };
        let result = generate_quiz(&llm, "source text", Difficulty::Easy, 3);
        assert!(matches!(result, Err(QuizError::InvalidFormat(_))));
    }

    #[test]
    fn test_evaluate_scores_answers() {
        let quiz = sample_quiz();
        let report = evaluate(&quiz, &["a".to_string(), "c".to_string()]);
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.correct_answers, 1);
        assert_eq!(report.incorrect_answers, 1);
        assert!((report.score_percentage - 50.0).abs() < f32::EPSILON);
        assert!(report.question_results[0].is_correct);
        assert!(!report.question_results[1].is_correct);
    }

    #[test]
    fn test_evaluate_is_case_insensitive() {
        let quiz = sample_quiz();
        let report = evaluate(&quiz, &["A".to_string(), "B".to_string()]);
        assert_eq!(report.correct_answers, 2);
        assert!((report.score_percentage - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_evaluate_counts_missing_answers_as_incorrect() {
        let quiz = sample_quiz();
        let report = evaluate(&quiz, &["a".to_string()]);
        assert_eq!(report.correct_answers, 1);
        assert_eq!(report.question_results[1].user_answer, "");
        assert!(!report.question_results[1].is_correct);
    }

    #[test]
    fn test_missing_explanation_gets_placeholder() {
        let quiz = sample_quiz();
        let report = evaluate(&quiz, &[]);
        assert_eq!(
            report.question_results[1].explanation,
            "No explanation provided."
        );
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("αβγδε", 3), "αβγ");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_question_count_is_capped() {
        // The prompt asks for at most MAX_QUESTIONS questions.
        let prompt = build_quiz_prompt("text", Difficulty::Hard, MAX_QUESTIONS);
        assert!(prompt.contains(&format!("Generate {MAX_QUESTIONS} hard-level")));
    }

    #[test]
    fn test_options_serialize_in_letter_order() {
        let mut options = BTreeMap::new();
        options.insert("b".to_string(), "Second".to_string());
        options.insert("a".to_string(), "First".to_string());
        let question = Question {
            question: "Q?".to_string(),
            options,
            correct_answer: "a".to_string(),
            explanation: None,
        };
        let json = serde_json::to_string(&question).unwrap();
        assert!(json.find("\"a\"").unwrap() < json.find("\"b\"").unwrap());
    }
}
