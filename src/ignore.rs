//! Ignore rule evaluation for stencil templates.
//! Decides whether a file or directory is excluded from the output tree
//! entirely, before any replacement logic runs.

use crate::pattern::{has_separator, normalize_separators, Pattern};

/// A single ignore rule: a human-readable description plus the pattern that
/// triggers it.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pub description: String,
    pub pattern: Pattern,
}

impl IgnoreRule {
    /// Tests this rule against an entry's bare name and full path.
    ///
    /// Regex patterns test the full path. Substring values containing a
    /// directory separator test path containment (with separators
    /// normalized); all other substring values test bare-name containment.
    pub fn is_match(&self, name: &str, path: &str) -> bool {
        match &self.pattern {
            Pattern::Regex(regex) => regex.is_match(path),
            Pattern::Substring(value) => {
                if has_separator(value) {
                    path.contains(&normalize_separators(value))
                } else {
                    name.contains(value.as_str())
                }
            }
        }
    }
}

/// Evaluates `rules` in order against one filesystem entry and returns the
/// first matching rule's description, or `None` if nothing matched.
///
/// Pure function of its inputs; short-circuits on the first match.
pub fn evaluate<'a>(name: &str, path: &str, rules: &'a [IgnoreRule]) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| rule.is_match(name, path))
        .map(|rule| rule.description.as_str())
}
