use thiserror::Error;

use crate::domain::Version;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Could not determine the Miniscope version under '{0}'")]
    VersionUndetermined(String),

    #[error("{operation} is not supported for the {version} format")]
    VersionMismatch {
        operation: &'static str,
        version: Version,
    },

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("Length mismatch: {what} (expected {expected}, found {found})")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Video probing unavailable: {0}")]
    ImportUnavailable(String),

    #[error("Video probe failed for '{path}': {reason}")]
    Probe { path: String, reason: String },

    #[error("Parse error in '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, ScopeError>;

impl ScopeError {
    pub(crate) fn parse(path: &std::path::Path, reason: impl Into<String>) -> Self {
        ScopeError::Parse {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}
