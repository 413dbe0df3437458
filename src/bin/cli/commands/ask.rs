use std::path::Path;

use anyhow::Result;

use studymate_lib::qa;

use crate::app::App;
use crate::commands::snippet;

pub fn run(app: &App, file: &Path, question: &str, top_k: usize) -> Result<()> {
    let index = app.index_document(file)?;
    println!("Indexed {} passages from {}.", index.len(), file.display());

    let answer = qa::answer_question(&index, &app.embeddings, &app.llm, question, top_k)?;

    println!("\nAnswer:\n{}", answer.text.trim());

    println!("\nSources:");
    for (i, source) in answer.sources.iter().enumerate() {
        println!(
            "{}. [{:.3}] {}",
            i + 1,
            source.score,
            snippet(&source.content, 300)
        );
    }

    let document = App::document_name(file);
    app.history.add(question, answer.text.trim(), &document)?;

    Ok(())
}
