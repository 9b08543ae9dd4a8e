//! Error handling for the stencil application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for stencil operations.
///
/// This enum represents all possible errors that can occur within the stencil
/// application. It implements the standard Error trait through thiserror's
/// derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors in configuration content, including unrecognized
    /// rule types and malformed rule shapes
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents a regular expression in the configuration that failed to
    /// compile
    #[error("Invalid regex pattern '{pattern}': {source}.")]
    RegexError {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Raised when the output directory already exists and --force was not
    /// given
    #[error("Output directory already exists: '{output_dir}'.")]
    OutputDirectoryExistsError { output_dir: String },

    /// Represents errors while walking the template tree or deciding an
    /// entry's fate
    #[error("Process error: {0}.")]
    ProcessError(String),
}

/// Convenience type alias for Results with stencil's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
