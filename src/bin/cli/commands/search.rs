use std::path::Path;

use anyhow::Result;

use crate::app::App;
use crate::commands::snippet;
use crate::OutputFormat;

pub fn run(
    app: &App,
    file: &Path,
    query: &str,
    top_k: usize,
    format: &OutputFormat,
) -> Result<()> {
    let index = app.index_document(file)?;
    let results = index.query(&app.embeddings, query, top_k)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Plain => {
            for result in &results {
                println!("#{} [{:.3}]", result.ordinal, result.score);
                println!("{}\n", snippet(&result.content, 300));
            }
        }
    }

    Ok(())
}
