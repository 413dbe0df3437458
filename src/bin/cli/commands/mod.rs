pub mod ask;
pub mod chunks;
pub mod history;
pub mod quiz;
pub mod search;
pub mod translate;

/// First `max_chars` characters of a text for compact display.
pub fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => format!("{}...", text[..offset].trim_end()),
        None => text.to_string(),
    }
}
