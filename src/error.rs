//! Error types for the disc catalog engine.

use std::path::PathBuf;
use thiserror::Error;

/// Catalog-related errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Volume root not found or not a directory: {0:?}")]
    RootNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog document {path:?}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("A catalog named '{0}' already exists")]
    DuplicateCatalog(String),

    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Build cancelled")]
    Cancelled,

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CatalogError {
    fn from(err: tokio::task::JoinError) -> Self {
        CatalogError::TaskFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
