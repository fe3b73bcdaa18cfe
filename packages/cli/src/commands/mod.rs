pub mod apply;
pub mod inspect;
pub mod normalize;

pub use apply::{apply, ApplyArgs};
pub use inspect::{inspect, InspectArgs};
pub use normalize::{normalize, NormalizeArgs};

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Input path does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("No page files found in {0}")]
    NoPages(PathBuf),
}

/// Page snapshots under `input`: the file itself, or every `*.json` below a directory
pub fn find_page_files(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(CliError::MissingInput(input.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(CliError::NoPages(input.to_path_buf()));
    }
    Ok(files)
}

/// Explicit input, or the configured pages directory
pub fn resolve_input(input: Option<PathBuf>, pages_dir: PathBuf) -> PathBuf {
    input.unwrap_or(pages_dir)
}
