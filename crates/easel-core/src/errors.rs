//! Error types for the Easel exporters.

use thiserror::Error;

/// Result type for Easel operations.
pub type Result<T> = std::result::Result<T, EaselError>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum EaselError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors while importing archived design text.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Document has neither a `spec` nor a `root` field")]
    MissingTree,

    #[error("Invalid design tree: {0}")]
    InvalidTree(#[source] serde_json::Error),
}

/// Errors while producing an export artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export format: {format}")]
    UnknownFormat { format: String },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Template error: {reason}")]
    Template { reason: String },
}
