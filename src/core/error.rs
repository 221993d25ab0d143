//! Error types for recordview

use std::path::PathBuf;
use thiserror::Error;

/// Result type for recordview operations
pub type Result<T> = std::result::Result<T, RecordViewError>;

/// Errors surfaced by the library.
///
/// Formatting never produces one of these; they cover caller contract
/// violations and loading schema/record files.
#[derive(Debug, Error)]
pub enum RecordViewError {
    /// A record must be a mapping at the top level
    #[error("record must be a mapping, got {found}")]
    NotAMapping { found: &'static str },

    /// Action is unknown or hidden by its condition for the current record
    #[error("action not available: {key}")]
    ActionUnavailable { key: String },

    /// File extension is not one of json, json5, yaml, yml
    #[error("unsupported file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON5 error
    #[error("JSON5 error: {0}")]
    Json5(#[from] json5::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
