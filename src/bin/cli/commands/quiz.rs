use std::path::Path;

use anyhow::Result;

use studymate_lib::quiz::{self, Difficulty, Quiz};

use crate::app::App;
use crate::OutputFormat;

pub fn run_generate(
    app: &App,
    file: &Path,
    difficulty: Difficulty,
    questions: usize,
) -> Result<()> {
    let text = app.extract_text(file)?;
    let quiz = quiz::generate_quiz(&app.llm, &text, difficulty, questions)?;
    app.quizzes.save(&quiz)?;

    println!(
        "Saved quiz {} ({} questions): {}",
        quiz.id,
        quiz.questions.len(),
        quiz.title
    );
    print_questions(&quiz);

    Ok(())
}

pub fn run_show(app: &App, id: &str) -> Result<()> {
    let quiz = app.quizzes.load(id)?;
    println!("{} ({} questions)", quiz.title, quiz.questions.len());
    print_questions(&quiz);
    Ok(())
}

pub fn run_grade(app: &App, id: &str, answers: &[String]) -> Result<()> {
    let quiz = app.quizzes.load(id)?;
    let report = quiz::evaluate(&quiz, answers);

    println!(
        "Score: {:.0}% ({}/{} correct)",
        report.score_percentage, report.correct_answers, report.total_questions
    );

    for (i, result) in report.question_results.iter().enumerate() {
        let verdict = if result.is_correct {
            "correct".to_string()
        } else if result.user_answer.is_empty() {
            format!("unanswered (correct: {})", result.correct_answer)
        } else {
            format!(
                "wrong ({} given, correct: {})",
                result.user_answer, result.correct_answer
            )
        };
        println!("\nQ{}: {}", i + 1, result.question);
        println!("  {verdict}");
        println!("  {}", result.explanation);
    }

    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let quizzes = app.quizzes.list()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&quizzes)?);
        }
        OutputFormat::Plain => {
            if quizzes.is_empty() {
                println!("No stored quizzes.");
                return Ok(());
            }
            for quiz in &quizzes {
                println!(
                    "{}  {}  {:2} questions  {}",
                    quiz.id,
                    quiz.created_at.format("%Y-%m-%d %H:%M"),
                    quiz.questions.len(),
                    quiz.title
                );
            }
        }
    }

    Ok(())
}

fn print_questions(quiz: &Quiz) {
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("\nQ{}: {}", i + 1, question.question);
        for (letter, option) in &question.options {
            println!("  {}. {}", letter.to_uppercase(), option);
        }
    }
}
