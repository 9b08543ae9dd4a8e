//! stencil's main application entry point and orchestration logic.
//! Handles command-line argument parsing, configuration loading and the
//! walk-and-copy flow that applies ignore and replace rules to a template.

use std::fs;
use std::path::{Path, PathBuf};

use stencil::{
    cli::{get_args, Args},
    config::{find_config_file, get_config},
    error::{default_error_handler, Error, Result},
    processor::{FileOperation, Processor},
};
use walkdir::WalkDir;

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Ensures the output directory is safe to write to.
///
/// # Arguments
/// * `output_dir` - Target directory path for generated output
/// * `force` - Whether to overwrite an existing directory
///
/// # Errors
/// * Returns `Error::OutputDirectoryExistsError` if the directory exists and
///   force is false
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

fn write_file(contents: &str, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest_path, contents).map_err(Error::IoError)
}

fn copy_file(source_path: &Path, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source_path, dest_path).map(|_| ()).map_err(Error::IoError)
}

fn print_reasons(reasons: &[String]) {
    for reason in reasons {
        println!("  REASON: '{}'", reason);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Validates the output directory
/// 2. Locates and normalizes the configuration
/// 3. Merges command-line token overrides over config tokens
/// 4. Walks the template tree, asking the processor for each entry's fate
/// 5. Executes the planned copy/write/mkdir operations
fn run(args: Args) -> Result<()> {
    let input_root = args.input_dir;
    let output_root = get_output_dir(&args.output_dir, args.force)?;

    let config_path = match args.config {
        Some(path) => path,
        None => find_config_file(&input_root)?,
    };
    println!("USING CONFIG: '{}'", config_path.display());
    let mut config = get_config(&config_path)?;

    // Command-line tokens take precedence over config-file tokens.
    for (name, value) in args.tokens {
        config.tokens.insert(name, value);
    }

    println!("COPY FROM:\n  '{}'\nTO:\n  '{}'", input_root.display(), output_root.display());
    fs::create_dir_all(&output_root)?;

    let mut processor = Processor::new(&config, &input_root, &output_root);
    let mut entries =
        WalkDir::new(&input_root).min_depth(1).sort_by_file_name().into_iter();
    while let Some(dir_entry) = entries.next() {
        let dir_entry = dir_entry.map_err(|e| Error::ProcessError(e.to_string()))?;
        let is_dir = dir_entry.file_type().is_dir();
        let result = processor.process(dir_entry.path(), is_dir)?;

        match result.operation {
            None => {
                println!("IGNORED: '{}'", result.source.display());
                print_reasons(&result.reasons);
                if is_dir {
                    entries.skip_current_dir();
                }
            }
            Some(operation) => {
                let target = match operation {
                    FileOperation::CreateDir { target } => {
                        fs::create_dir_all(&target)?;
                        target
                    }
                    FileOperation::Copy { target } => {
                        copy_file(dir_entry.path(), &target)?;
                        target
                    }
                    FileOperation::Write { target, contents } => {
                        write_file(&contents, &target)?;
                        target
                    }
                };
                println!("{}: '{}'", result.action, target.display());
                print_reasons(&result.reasons);
            }
        }
    }

    println!();
    println!("COMPLETE!");
    Ok(())
}
