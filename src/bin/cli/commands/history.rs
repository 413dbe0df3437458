use anyhow::Result;

use crate::app::App;
use crate::commands::snippet;
use crate::OutputFormat;

pub fn run(
    app: &App,
    document: Option<&str>,
    clear: bool,
    format: &OutputFormat,
) -> Result<()> {
    if clear {
        app.history.clear()?;
        println!("History cleared.");
        return Ok(());
    }

    let entries = match document {
        Some(name) => app.history.for_document(name),
        None => app.history.load(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No history yet.");
                return Ok(());
            }
            for entry in &entries {
                println!(
                    "[{}] {}: {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.document,
                    entry.question
                );
                println!("  {}", snippet(&entry.answer, 200));
            }
        }
    }

    Ok(())
}
