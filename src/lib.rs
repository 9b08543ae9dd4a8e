//! stencil is a directory template scaffolding tool.
//! It copies a template directory tree into a new output tree, skipping
//! entries that match ignore rules and rewriting file names, output paths
//! and file contents through find/replace rules with token substitution.

/// Command-line interface module for the stencil application
pub mod cli;

/// Configuration handling for stencil templates
/// Supports JSON and YAML formats (.stencil.json, .stencil.yml, .stencil.yaml)
pub mod config;

/// Error types and handling for the stencil application
pub mod error;

/// Ignore rule evaluation
/// Decides which template entries are excluded from the output tree
pub mod ignore;

/// The substring/regex match pattern shared by ignore and replace rules
pub mod pattern;

/// Core template processing orchestration
/// Combines all components to decide the fate of each template entry
pub mod processor;

/// Replace rule resolution
/// Computes rewritten names, output paths and file contents per entry
pub mod replace;

/// The case-preserving, token-aware substitution primitive
pub mod substitute;
