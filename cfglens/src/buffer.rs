//! Line buffer holding one running-config document.
//!
//! The buffer is built once from the decoded text and never mutated
//! afterwards. Every extraction pass walks the same buffer.

use std::borrow::Cow;

/// Ordered, trimmed lines of a single configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split `text` into lines, trimming surrounding whitespace from each.
    ///
    /// Blank lines are kept so that line positions match the source.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(|line| line.trim().to_string()).collect(),
        }
    }

    /// Iterate over the lines in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Get a line by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines in the document.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the first line containing `needle`.
    ///
    /// Used for secondary lookups that tie a line elsewhere in the
    /// document back to a record (e.g. a BGP peer's description).
    pub fn find_containing(&self, needle: &str) -> Option<&str> {
        self.iter().find(|line| line.contains(needle))
    }
}

impl From<&str> for LineBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Decode an uploaded configuration file.
///
/// Tries UTF-8 first and falls back to Latin-1, where every byte maps to
/// the code point of the same value. Never fails.
pub fn decode_config(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            log::debug!("config is not valid UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}
