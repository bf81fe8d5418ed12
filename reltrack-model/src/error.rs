//! Error types for type declarations and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while declaring or configuring document types.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No type with this name has been registered.
    #[error("unknown document type: {0}")]
    UnknownType(String),

    /// A type with this name is already registered.
    #[error("document type already registered: {0}")]
    DuplicateType(String),

    /// The configuration file exists but could not be read.
    #[error("failed to read tracking config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("invalid tracking config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
