//! Input sanitization for user messages.
//!
//! Contact details and links are removed before a message is stored or sent to
//! any collaborator.

use regex::Regex;

use crate::advisor::core::errors::AdvisorResult;

/// Default maximum message length in chars.
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Strips e-mails, phone numbers and URLs, then bounds the message length.
pub struct Sanitizer {
    url: Regex,
    email: Regex,
    phone: Regex,
    whitespace: Regex,
    max_chars: usize,
}

impl Sanitizer {
    /// Create a sanitizer truncating to `max_chars` chars.
    ///
    /// # Errors
    /// Returns an error if a built-in pattern fails to compile.
    pub fn new(max_chars: usize) -> AdvisorResult<Self> {
        Ok(Self {
            url: Regex::new(r"(?i)\b(?:https?://|www\.)\S+")?,
            email: Regex::new(r"(?i)[\w.+-]+@[\w-]+(?:\.[\w-]+)+")?,
            phone: Regex::new(
                r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{2,3}\)[\s.-]?|\b\d{2,3}[\s.-])?\b\d{4,5}[\s.-]?\d{4}\b|\+?\b\d{10,13}\b",
            )?,
            whitespace: Regex::new(r"\s+")?,
            max_chars,
        })
    }

    /// Maximum message length in chars.
    #[must_use]
    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Clean a raw message.
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        let text = self.url.replace_all(raw, " ");
        let text = self.email.replace_all(&text, " ");
        let text = self.phone.replace_all(&text, " ");
        let text = self.whitespace.replace_all(&text, " ");
        truncate_chars(text.trim(), self.max_chars)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}
