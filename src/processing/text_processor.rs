//! Text processing and normalization

use regex::Regex;

pub struct TextProcessor {
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self { whitespace_regex }
    }

    /// Collapse line breaks and whitespace runs into single spaces and trim.
    ///
    /// Idempotent: normalizing already-normalized text returns it unchanged.
    pub fn normalize(&self, text: &str) -> String {
        let flattened = text.replace(&['\r', '\n'][..], " ");
        self.whitespace_regex
            .replace_all(&flattened, " ")
            .trim()
            .to_string()
    }

    /// Keep at most `max_chars` characters, appending an ellipsis when text was cut
    pub fn truncate(&self, text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
            None => text.to_string(),
        }
    }
}
