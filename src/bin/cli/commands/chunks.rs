use std::path::Path;

use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, file: &Path, format: &OutputFormat) -> Result<()> {
    let passages = app.load_passages(file)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&passages)?);
        }
        OutputFormat::Plain => {
            println!("{} passages:", passages.len());
            for (ordinal, passage) in passages.iter().enumerate() {
                println!("--- #{ordinal} ({} chars)", passage.chars().count());
                println!("{passage}");
            }
        }
    }

    Ok(())
}
