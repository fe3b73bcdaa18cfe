//! Error types for the page model

use thiserror::Error;

/// Errors raised while turning a persisted snapshot into a typed page
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Section {section_id} has settings that do not fit type {type_tag}: {source}")]
    InvalidSettings {
        section_id: String,
        type_tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Section id {0} is used more than once")]
    DuplicateSectionId(String),

    #[error("Section {section_id} has more than one child with id {child_id}")]
    DuplicateChildId { section_id: String, child_id: String },
}

/// Errors from model-level parsing helpers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown block shape: {0}")]
    UnknownBlockShape(String),

    #[error("Unknown section type: {0}")]
    UnknownSectionType(String),
}
