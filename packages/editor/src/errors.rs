//! Error types for the editor

use thiserror::Error;
use vitrine_model::LoadError;

/// Errors at the persistence boundary
///
/// Mutations never fail; only loading and saving a page can.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
