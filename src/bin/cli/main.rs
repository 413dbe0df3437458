mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use studymate_lib::qa::DEFAULT_TOP_K;
use studymate_lib::quiz::Difficulty;

#[derive(Parser)]
#[command(
    name = "studymate-cli",
    about = "Document Q&A and study tools over a local language model",
    version
)]
struct Cli {
    /// Path to a studymate.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a question about a document
    Ask {
        /// Document file to read
        file: PathBuf,
        /// The question to answer
        question: String,
        /// Number of passages used as context
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Show the passages most similar to a query
    Search {
        /// Document file to read
        file: PathBuf,
        /// Similarity query
        query: String,
        /// Maximum results
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Print a document's passages
    Chunks {
        /// Document file to read
        file: PathBuf,
    },

    /// Generate, grade, and inspect quizzes
    #[command(subcommand)]
    Quiz(QuizCommand),

    /// Translate text with the configured language model
    Translate {
        /// Target language code (e.g. "es", "fr")
        language: String,
        /// Text to translate (use "-" to read from stdin)
        text: String,
    },

    /// Show or clear answered-question history
    History {
        /// Only show entries for this document name
        #[arg(long)]
        document: Option<String>,
        /// Delete the stored history
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum QuizCommand {
    /// Generate a quiz from a document
    Generate {
        /// Document file to read
        file: PathBuf,
        /// easy, medium, or hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        /// Number of questions (max 20)
        #[arg(long, default_value_t = 5)]
        questions: usize,
    },

    /// Print a stored quiz
    Show {
        /// Quiz id
        id: String,
    },

    /// Grade a quiz attempt: answer letters in question order
    Grade {
        /// Quiz id
        id: String,
        /// Chosen answer letters, one per question
        answers: Vec<String>,
    },

    /// List stored quizzes
    List,
}

/// Resolve "-" as stdin.
fn resolve_text(text: String) -> String {
    if text == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
        buf
    } else {
        text
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.config.as_deref())?;

    match cli.command {
        Command::Ask {
            file,
            question,
            top_k,
        } => {
            commands::ask::run(&app, &file, &question, top_k)?;
        }
        Command::Search {
            file,
            query,
            top_k,
        } => {
            commands::search::run(&app, &file, &query, top_k, &cli.format)?;
        }
        Command::Chunks { file } => {
            commands::chunks::run(&app, &file, &cli.format)?;
        }
        Command::Quiz(subcmd) => match subcmd {
            QuizCommand::Generate {
                file,
                difficulty,
                questions,
            } => {
                commands::quiz::run_generate(&app, &file, difficulty, questions)?;
            }
            QuizCommand::Show { id } => {
                commands::quiz::run_show(&app, &id)?;
            }
            QuizCommand::Grade { id, answers } => {
                commands::quiz::run_grade(&app, &id, &answers)?;
            }
            QuizCommand::List => {
                commands::quiz::run_list(&app, &cli.format)?;
            }
        },
        Command::Translate { language, text } => {
            let text = resolve_text(text);
            commands::translate::run(&app, &language, &text)?;
        }
        Command::History { document, clear } => {
            commands::history::run(&app, document.as_deref(), clear, &cli.format)?;
        }
    }

    Ok(())
}
