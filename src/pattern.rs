//! The match pattern shared by ignore rules and replace rules.
//! A pattern is either a literal substring or a compiled regular expression;
//! any other kind is rejected when the configuration is normalized.

use regex::Regex;
use std::path::MAIN_SEPARATOR_STR;

/// A compiled rule pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Literal substring, matched case-sensitively.
    Substring(String),
    /// Compiled regular expression, matched anywhere in the candidate text.
    Regex(Regex),
}

impl Pattern {
    /// Returns whether the pattern matches anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Substring(value) => text.contains(value.as_str()),
            Pattern::Regex(regex) => regex.is_match(text),
        }
    }

    /// Returns the byte ranges of all non-overlapping matches in `text`,
    /// in left-to-right order.
    ///
    /// Both arms are stateless: repeated calls on the same input always
    /// produce the same ranges.
    pub fn find_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        match self {
            Pattern::Substring(value) => text
                .match_indices(value.as_str())
                .map(|(start, matched)| (start, start + matched.len()))
                .collect(),
            Pattern::Regex(regex) => {
                regex.find_iter(text).map(|m| (m.start(), m.end())).collect()
            }
        }
    }

    /// Returns the variant of this pattern used for matching paths:
    /// substring values get their separators normalized to the platform
    /// separator, regular expressions are used as written.
    pub fn for_paths(&self) -> Pattern {
        match self {
            Pattern::Substring(value) => Pattern::Substring(normalize_separators(value)),
            Pattern::Regex(regex) => Pattern::Regex(regex.clone()),
        }
    }
}

/// Returns whether `value` contains a directory separator (`/` or `\`).
pub fn has_separator(value: &str) -> bool {
    value.contains(['/', '\\'])
}

/// Rewrites both separator styles in `value` to the platform separator.
pub fn normalize_separators(value: &str) -> String {
    value.replace(['/', '\\'], MAIN_SEPARATOR_STR)
}
