//! Error types for documentation parsing.
//!
//! Unrecognized code fragments, missing anchors and empty parameter text are
//! not errors; they degrade to empty values. Only structural faults in the
//! document and failures of the surrounding I/O surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or parsing documentation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A CSS selector failed to compile.
    #[error("invalid selector: {0}")]
    Selector(String),

    /// A candidate code element has no enclosing list item. This points at
    /// a change in the upstream documentation format.
    #[error("code fragment {0:?} is not inside a list item")]
    MissingListItem(String),

    /// No registered parser carries the requested identifier.
    #[error("unknown documentation source: {0}")]
    UnknownSource(String),

    /// The snapshot store holds no snapshot for the requested file.
    #[error("no documentation snapshot found under {}", .0.display())]
    NoSnapshot(PathBuf),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
