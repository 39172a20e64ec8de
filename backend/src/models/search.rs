//! Keyword search over lessons.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::lesson::Lesson;

/// Fields a search term is matched against.
///
/// `price` and `spaces` are listed for parity with the stored query, but a
/// pattern only ever matches string values, so numeric entries never match.
pub const SEARCH_FIELDS: [&str; 4] = ["subject", "location", "price", "spaces"];

/// A case-insensitive regular expression taken verbatim from the client.
///
/// The same source string is evaluated in memory by [`SearchTerm::matches`]
/// and sent to MongoDB as a `$regex`.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    raw: String,
    pattern: Regex,
}

impl SearchTerm {
    /// Compile `raw` as a pattern.
    ///
    /// # Errors
    /// Fails when `raw` is not a valid regular expression, e.g. `"("`.
    pub fn new(raw: impl Into<String>) -> Result<Self, regex::Error> {
        let raw = raw.into();
        let pattern = RegexBuilder::new(&raw).case_insensitive(true).build()?;
        Ok(Self { raw, pattern })
    }

    /// Pattern source as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether any searched field of `lesson` holds a string matching the term.
    pub fn matches(&self, lesson: &Lesson) -> bool {
        SEARCH_FIELDS.iter().any(|field| match lesson.fields.get(*field) {
            Some(Value::String(text)) => self.pattern.is_match(text),
            _ => false,
        })
    }
}
