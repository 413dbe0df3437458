//! Prompt-based translation through the completion service.

use crate::llm::{LlmClient, Result};

/// Supported target languages, code to English name.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("zh", "Chinese"),
    ("hi", "Hindi"),
    ("ar", "Arabic"),
];

/// Look up the English name of a language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Translate text into the target language.
///
/// Unknown codes are passed to the model verbatim rather than rejected.
pub fn translate(llm: &dyn LlmClient, text: &str, target: &str) -> Result<String> {
    let target_name = language_name(target).unwrap_or(target);

    let prompt = format!(
        "You are a professional translator. Translate the following English text to {target_name}.\n\
         Provide only the translation, no additional text or explanations.\n\n\
         Text to translate: \"{text}\"\n\n\
         Translation:"
    );

    let reply = llm.complete(&prompt)?;
    Ok(clean_translation(&reply))
}

/// Strip a leading "Translation:"-style label some models prepend.
fn clean_translation(reply: &str) -> String {
    let text = reply.trim();

    if let Some((label, rest)) = text.split_once(':') {
        if !label.contains('\n') && label.len() <= 20 {
            return rest.trim().to_string();
        }
    }

    text.to_string()
}
