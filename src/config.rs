//! Configuration handling for stencil templates.
//! This module loads the template configuration (JSON or YAML), resolves the
//! shorthand rule forms and compiles every rule into its normalized shape.
//! All configuration errors surface here, before any filesystem mutation.

use indexmap::IndexMap;
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ignore::IgnoreRule;
use crate::pattern::Pattern;
use crate::replace::{ReplaceOptions, ReplaceRule};

/// Supported configuration file names, tried in order inside the template
/// directory when --config is not given.
pub const CONFIG_FILES: [&str; 3] = [".stencil.json", ".stencil.yml", ".stencil.yaml"];

/// Fully normalized configuration: compiled rule lists plus the token
/// dictionary. Constructed once per run, read-only afterwards.
#[derive(Debug, Default)]
pub struct Config {
    pub tokens: IndexMap<String, String>,
    pub ignore: Vec<IgnoreRule>,
    pub replace: Vec<ReplaceRule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    tokens: IndexMap<String, String>,
    ignore: Vec<RawIgnoreRule>,
    replace: Vec<RawReplaceRule>,
}

/// The `{type, value}` shape shared by ignore rules and find patterns.
/// An unrecognized `type` tag fails deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawPattern {
    #[serde(rename = "string")]
    String { value: String },
    #[serde(rename = "regex")]
    Regex { value: RawRegex },
}

#[derive(Debug, Deserialize)]
struct RawRegex {
    expression: String,
    #[serde(default)]
    flags: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIgnoreRule {
    /// Bare-string shorthand: the value doubles as the description.
    Shorthand(String),
    Rule(RawIgnoreRuleFull),
}

#[derive(Debug, Deserialize)]
struct RawIgnoreRuleFull {
    description: String,
    #[serde(flatten)]
    pattern: RawPattern,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFind {
    /// Bare-string shorthand for a substring find.
    Shorthand(String),
    Pattern(RawPattern),
}

#[derive(Debug, Deserialize)]
struct RawReplaceRule {
    description: Option<String>,
    find: RawFind,
    replace: String,
    #[serde(default)]
    options: ReplaceOptions,
    files: Option<Vec<String>>,
}

/// Locates the configuration file inside a template directory.
///
/// # Arguments
/// * `input_dir` - The template directory
///
/// # Returns
/// * `Result<PathBuf>` - Path of the first existing candidate
///
/// # Errors
/// * `Error::ConfigError` if none of the candidates exists
pub fn find_config_file(input_dir: &Path) -> Result<PathBuf> {
    for file in CONFIG_FILES {
        let config_path = input_dir.join(file);
        if config_path.exists() {
            return Ok(config_path);
        }
    }

    Err(Error::ConfigError(format!(
        "no configuration file found in '{}' (tried: {})",
        input_dir.display(),
        CONFIG_FILES.join(", ")
    )))
}

/// Loads and normalizes the configuration file at `config_path`.
pub fn get_config(config_path: &Path) -> Result<Config> {
    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(config_path)?;
    parse_config(&content)
}

/// Parses configuration content, trying JSON first and YAML second, then
/// compiles every rule into its normalized shape.
///
/// # Errors
/// * `Error::ConfigError` for unparseable content, unrecognized rule types
///   or unsupported regex flags
/// * `Error::RegexError` for regex expressions that fail to compile
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid configuration format: {e}")))?,
    };

    let ignore = raw
        .ignore
        .into_iter()
        .map(compile_ignore_rule)
        .collect::<Result<Vec<_>>>()?;
    let replace = raw
        .replace
        .into_iter()
        .map(compile_replace_rule)
        .collect::<Result<Vec<_>>>()?;

    Ok(Config { tokens: raw.tokens, ignore, replace })
}

fn compile_ignore_rule(rule: RawIgnoreRule) -> Result<IgnoreRule> {
    match rule {
        RawIgnoreRule::Shorthand(value) => Ok(IgnoreRule {
            description: value.clone(),
            pattern: Pattern::Substring(value),
        }),
        RawIgnoreRule::Rule(rule) => Ok(IgnoreRule {
            description: rule.description,
            pattern: compile_pattern(rule.pattern)?,
        }),
    }
}

fn compile_replace_rule(rule: RawReplaceRule) -> Result<ReplaceRule> {
    let find = match rule.find {
        RawFind::Shorthand(value) => Pattern::Substring(value),
        RawFind::Pattern(pattern) => compile_pattern(pattern)?,
    };

    Ok(ReplaceRule {
        // The replace value stands in for a missing description.
        description: rule.description.unwrap_or_else(|| rule.replace.clone()),
        find,
        replace: rule.replace,
        options: rule.options,
        files: rule.files,
    })
}

fn compile_pattern(pattern: RawPattern) -> Result<Pattern> {
    match pattern {
        RawPattern::String { value } => Ok(Pattern::Substring(value)),
        RawPattern::Regex { value } => Ok(Pattern::Regex(compile_regex(&value)?)),
    }
}

fn compile_regex(raw: &RawRegex) -> Result<Regex> {
    let mut builder = RegexBuilder::new(&raw.expression);
    for flag in raw.flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            // The engine always replaces every match and operates on UTF-8
            // strings, so these carry no extra meaning here.
            'g' | 'u' => {}
            other => {
                return Err(Error::ConfigError(format!(
                    "unsupported regex flag '{other}' in pattern '{}'",
                    raw.expression
                )));
            }
        }
    }

    builder.build().map_err(|source| Error::RegexError {
        pattern: raw.expression.clone(),
        source,
    })
}
