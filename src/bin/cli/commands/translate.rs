use anyhow::Result;

use studymate_lib::translator;

use crate::app::App;

pub fn run(app: &App, language: &str, text: &str) -> Result<()> {
    if translator::language_name(language).is_none() {
        log::warn!("Unknown language code '{language}', passing it to the model as-is");
    }

    let translation = translator::translate(&app.llm, text, language)?;
    println!("{translation}");

    Ok(())
}
