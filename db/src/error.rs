//! Error types for card resource access.
//!
//! Covers every way a resource adapter or the configuration loader can
//! fail.

use thiserror::Error;

/// Errors that can occur while reading card resources or configuration.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A named resource does not exist in the adapter.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// The declared schema version is not a positive integer.
    #[error("invalid version declaration: {0}")]
    InvalidVersion(String),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ResourceError`].
pub type Result<T> = std::result::Result<T, ResourceError>;
