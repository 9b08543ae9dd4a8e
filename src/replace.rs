//! Replace rule resolution for stencil templates.
//! For each filesystem entry, works out which rules match its name, output
//! path and contents, and computes the rewritten values.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;
use crate::pattern::{normalize_separators, Pattern};
use crate::substitute::substitute;

/// Per-rule switches selecting which targets a rule may rewrite.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplaceOptions {
    /// Rewrite the entry's bare name.
    pub file_name: bool,
    /// Rewrite the entry's full output path.
    pub file_path: bool,
    /// Rewrite the textual contents of plain files.
    pub file_contents: bool,
    /// Reshape each replacement to mimic the matched text's casing.
    pub maintain_case: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self { file_name: true, file_path: true, file_contents: false, maintain_case: false }
    }
}

/// A single find/replace directive.
#[derive(Debug, Clone)]
pub struct ReplaceRule {
    pub description: String,
    pub find: Pattern,
    /// Replacement literal, or the name of a token to substitute instead.
    pub replace: String,
    pub options: ReplaceOptions,
    /// Path fragments restricting which files get content replacement.
    pub files: Option<Vec<String>>,
}

/// The computed outcome for one entry. `None` fields mean "no rule altered
/// this target" and the caller keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacement {
    /// Descriptions of every rule that matched at least one target.
    pub descriptions: Vec<String>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_contents: Option<String>,
}

/// Resolves the replacement outcome for one filesystem entry.
///
/// Rules are evaluated in list order. Each of the three targets (name,
/// path, contents) is folded independently through the rule list: a rule
/// matches against the current running value of a target and its
/// substitution result becomes the input for the next rule on that same
/// target.
///
/// Contents are only considered for plain files with the `fileContents`
/// option enabled; a rule's `files` restriction additionally requires the
/// current name to equal a listed fragment or the current output path to
/// contain one (separators normalized). File text is obtained at most once,
/// lazily, through `read_contents`.
///
/// # Arguments
/// * `name` - The entry's bare file or directory name
/// * `output_path` - The caller's proposed output path for the entry
/// * `rules` - Replace rules in priority order
/// * `tokens` - Token dictionary for replacement indirection
/// * `is_dir` - Whether the entry is a directory
/// * `read_contents` - Supplies the entry's text on first demand
///
/// # Returns
/// * `Ok(Some(Replacement))` if at least one rule altered a target
/// * `Ok(None)` if no rule touched the entry
/// * `Err` if reading the contents failed
pub fn resolve(
    name: &str,
    output_path: &str,
    rules: &[ReplaceRule],
    tokens: &IndexMap<String, String>,
    is_dir: bool,
    read_contents: impl FnOnce() -> Result<String>,
) -> Result<Option<Replacement>> {
    let mut descriptions = Vec::new();
    let mut new_name: Option<String> = None;
    let mut new_path: Option<String> = None;
    let mut new_contents: Option<String> = None;

    // The original file text, read once on first demand.
    let mut read_contents = Some(read_contents);
    let mut contents: Option<String> = None;

    for rule in rules {
        let current_name = new_name.as_deref().unwrap_or(name);
        let current_path = new_path.as_deref().unwrap_or(output_path);

        let mut wants_contents = rule.options.file_contents && !is_dir;
        if let Some(fragments) = rule.files.as_deref() {
            wants_contents = wants_contents
                && fragments.iter().any(|fragment| {
                    current_name == fragment
                        || current_path.contains(&normalize_separators(fragment))
                });
        }
        if wants_contents && contents.is_none() {
            if let Some(read) = read_contents.take() {
                contents = Some(read()?);
            }
        }
        let current_contents = new_contents.as_deref().or(contents.as_deref());

        let find_for_path = rule.find.for_paths();
        let matches_name = rule.options.file_name && rule.find.matches(current_name);
        let matches_path = rule.options.file_path && find_for_path.matches(current_path);
        let matches_contents = wants_contents
            && current_contents.is_some_and(|text| rule.find.matches(text));

        if matches_name || matches_path || matches_contents {
            descriptions.push(rule.description.clone());
        }

        if matches_name {
            let substituted = substitute(
                current_name,
                &rule.find,
                &rule.replace,
                tokens,
                rule.options.maintain_case,
            );
            new_name = Some(substituted);
        }
        if matches_path {
            let substituted = substitute(
                current_path,
                &find_for_path,
                &normalize_separators(&rule.replace),
                tokens,
                rule.options.maintain_case,
            );
            new_path = Some(substituted);
        }
        if matches_contents {
            let substituted = substitute(
                current_contents.unwrap_or_default(),
                &rule.find,
                &rule.replace,
                tokens,
                rule.options.maintain_case,
            );
            new_contents = Some(substituted);
        }
    }

    if new_name.is_some() || new_path.is_some() || new_contents.is_some() {
        Ok(Some(Replacement {
            descriptions,
            file_name: new_name,
            file_path: new_path,
            file_contents: new_contents,
        }))
    } else {
        Ok(None)
    }
}
