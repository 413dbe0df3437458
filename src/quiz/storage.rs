//! File-backed quiz persistence, one JSON file per quiz.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Quiz, QuizError, Result};

pub struct QuizStore {
    quizzes_dir: PathBuf,
}

impl QuizStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            quizzes_dir: data_dir.join("quizzes"),
        }
    }

    fn quiz_path(&self, id: &str) -> PathBuf {
        self.quizzes_dir.join(format!("quiz_{id}.json"))
    }

    /// Persist a quiz, creating the quizzes directory if needed.
    pub fn save(&self, quiz: &Quiz) -> Result<()> {
        fs::create_dir_all(&self.quizzes_dir)?;
        let json = serde_json::to_string_pretty(quiz)?;
        fs::write(self.quiz_path(&quiz.id), json)?;
        Ok(())
    }

    /// Load a quiz by id.
    pub fn load(&self, id: &str) -> Result<Quiz> {
        let path = self.quiz_path(id);
        if !path.exists() {
            return Err(QuizError::NotFound(id.to_string()));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// List all stored quizzes, newest first. Unparsable files are skipped.
    pub fn list(&self) -> Result<Vec<Quiz>> {
        if !self.quizzes_dir.exists() {
            return Ok(Vec::new());
        }

        let mut quizzes = Vec::new();
        for entry in fs::read_dir(&self.quizzes_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with("quiz_") || !name.ends_with(".json") {
                continue;
            }

            let json = fs::read_to_string(entry.path())?;
            match serde_json::from_str::<Quiz>(&json) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => log::warn!("Skipping unparsable quiz file {name}: {e}"),
            }
        }

        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Question, Quiz};
    use std::collections::BTreeMap;

    fn sample_quiz(title: &str) -> Quiz {
        let mut options = BTreeMap::new();
        options.insert("a".to_string(), "Yes".to_string());
        options.insert("b".to_string(), "No".to_string());
        Quiz::new(
            title.to_string(),
            vec![Question {
                question: "Is water wet?".to_string(),
                options,
                correct_answer: "a".to_string(),
                explanation: None,
            }],
        )
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuizStore::new(dir.path());

        let quiz = sample_quiz("Round Trip");
        store.save(&quiz).unwrap();

        let loaded = store.load(&quiz.id).unwrap();
        assert_eq!(loaded.id, quiz.id);
        assert_eq!(loaded.title, "Round Trip");
        assert_eq!(loaded.questions.len(), 1);
    }

    #[test]
    fn test_load_missing_quiz_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuizStore::new(dir.path());

        let result = store.load("doesnotexist");
        assert!(matches!(result, Err(QuizError::NotFound(_))));
    }

    #[test]
    fn test_list_returns_saved_quizzes() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuizStore::new(dir.path());

        store.save(&sample_quiz("First")).unwrap();
        store.save(&sample_quiz("Second")).unwrap();

        let quizzes = store.list().unwrap();
        assert_eq!(quizzes.len(), 2);
    }

    #[test]
    fn test_list_skips_unparsable_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuizStore::new(dir.path());

        store.save(&sample_quiz("Valid")).unwrap();
        fs::write(dir.path().join("quizzes/quiz_broken.json"), "not json").unwrap();

        let quizzes = store.list().unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].title, "Valid");
    }

    #[test]
    fn test_list_on_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuizStore::new(&dir.path().join("nothing"));
        assert!(store.list().unwrap().is_empty());
    }
}
