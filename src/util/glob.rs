//! Limited wildcard matching for pool names.
//!
//! A glob supports single-character (`?`) and multi-character (`*`)
//! wildcards, similar to Unix shell globbing. There is no escape symbol;
//! every other character matches literally.

use std::fmt;

use regex::Regex;

use crate::core::errors::{Result, SelectionError};

/// A wildcard pattern over pool names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    pattern: String,
}

impl Glob {
    /// Wrap a raw pattern string.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The raw pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Compile to an anchored regex, quoting every literal segment.
    pub fn to_regex(&self) -> Result<Regex> {
        let mut translated = String::with_capacity(self.pattern.len() + 8);
        translated.push('^');
        let mut literal_start = 0;
        for (i, c) in self.pattern.char_indices() {
            match c {
                '?' => {
                    translated.push_str(&regex::escape(&self.pattern[literal_start..i]));
                    translated.push('.');
                    literal_start = i + 1;
                }
                '*' => {
                    translated.push_str(&regex::escape(&self.pattern[literal_start..i]));
                    translated.push_str(".*");
                    literal_start = i + 1;
                }
                _ => {}
            }
        }
        translated.push_str(&regex::escape(&self.pattern[literal_start..]));
        translated.push('$');

        Regex::new(&translated).map_err(|source| SelectionError::PatternCompile {
            pattern: self.pattern.clone(),
            details: source.to_string(),
        })
    }

    /// Whether the full text matches the pattern.
    pub fn matches(&self, text: &str) -> Result<bool> {
        Ok(self.to_regex()?.is_match(text))
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl From<&str> for Glob {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}
