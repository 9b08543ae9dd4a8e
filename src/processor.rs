//! Core template processing orchestration.
//! Walks the decisions for every template entry: skip it, copy it, or write
//! it with a rewritten name, path or contents.

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{ignore, replace};

/// A planned filesystem mutation for one entry. The processor only decides;
/// the caller performs the mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    CreateDir { target: PathBuf },
    Copy { target: PathBuf },
    Write { target: PathBuf, contents: String },
}

/// The decision for one walked entry.
#[derive(Debug)]
pub struct ProcessResult {
    pub source: PathBuf,
    /// Console action label: IGNORED, MKDIR, COPY or WRITE.
    pub action: &'static str,
    /// Descriptions of the rules that caused the outcome.
    pub reasons: Vec<String>,
    /// `None` when the entry is ignored.
    pub operation: Option<FileOperation>,
}

/// Decides the fate of template entries, visited parents before children.
pub struct Processor<'a> {
    config: &'a Config,
    /// Every visited input directory mapped to its (possibly renamed) output
    /// directory, so a renamed directory relocates everything beneath it.
    output_dirs: HashMap<PathBuf, PathBuf>,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a Config, input_root: &Path, output_root: &Path) -> Self {
        let mut output_dirs = HashMap::new();
        output_dirs.insert(input_root.to_path_buf(), output_root.to_path_buf());
        Self { config, output_dirs }
    }

    /// Decides what to do with one entry.
    ///
    /// Asks the ignore evaluator first; on a match the entry is skipped and
    /// callers should prune the subtree for directories. Otherwise asks the
    /// replace resolver for a possibly rewritten name, path and contents.
    /// Reading file text for content replacement is the only I/O here.
    pub fn process(&mut self, source: &Path, is_dir: bool) -> Result<ProcessResult> {
        let name = source.file_name().and_then(|name| name.to_str()).ok_or_else(|| {
            Error::ProcessError(format!("invalid entry name: '{}'", source.display()))
        })?;
        let source_str = source.to_str().ok_or_else(|| {
            Error::ProcessError(format!("non UTF-8 path: '{}'", source.display()))
        })?;

        if let Some(reason) = ignore::evaluate(name, source_str, &self.config.ignore) {
            debug!("Ignoring '{}': {}", source.display(), reason);
            return Ok(ProcessResult {
                source: source.to_path_buf(),
                action: "IGNORED",
                reasons: vec![reason.to_string()],
                operation: None,
            });
        }

        let parent_output = source
            .parent()
            .and_then(|parent| self.output_dirs.get(parent))
            .cloned()
            .ok_or_else(|| {
                Error::ProcessError(format!(
                    "entry outside the template tree: '{}'",
                    source.display()
                ))
            })?;
        let candidate = parent_output.join(name);
        let candidate_str = candidate.to_str().ok_or_else(|| {
            Error::ProcessError(format!("non UTF-8 path: '{}'", candidate.display()))
        })?;

        let replacement = replace::resolve(
            name,
            candidate_str,
            &self.config.replace,
            &self.config.tokens,
            is_dir,
            || fs::read_to_string(source).map_err(Error::IoError),
        )?;

        let mut target = candidate.clone();
        let mut reasons = Vec::new();
        let mut contents = None;
        if let Some(replacement) = replacement {
            reasons = replacement.descriptions;
            if let Some(file_name) = replacement.file_name {
                debug!("Replacing file name of '{}' with '{}'", source.display(), file_name);
                target = parent_output.join(file_name);
            }
            // A rewritten path overrides a rewritten name.
            if let Some(file_path) = replacement.file_path {
                debug!("Replacing file path of '{}' with '{}'", source.display(), file_path);
                target = PathBuf::from(file_path);
            }
            contents = replacement.file_contents;
        }

        let (action, operation) = if is_dir {
            self.output_dirs.insert(source.to_path_buf(), target.clone());
            ("MKDIR", FileOperation::CreateDir { target })
        } else if let Some(contents) = contents {
            ("WRITE", FileOperation::Write { target, contents })
        } else {
            ("COPY", FileOperation::Copy { target })
        };

        Ok(ProcessResult {
            source: source.to_path_buf(),
            action,
            reasons,
            operation: Some(operation),
        })
    }
}
