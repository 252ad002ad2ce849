//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global config file,
//! then `DISC_CATALOG__SECTION__KEY` environment variables.

use crate::logging::{self, LoggingConfig};
use crate::store::RecoveryPolicy;
use crate::tree::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod loader;
mod merge;
mod sources;

pub use loader::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Application directory name under the platform config and data homes
pub const APP_NAME: &str = "disc-catalog";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    /// Volume scan settings
    #[serde(default)]
    pub scan: WalkerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how the catalog document is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_document_path")]
    pub document_path: PathBuf,

    /// Behavior when the document does not decode
    #[serde(default)]
    pub on_malformed: RecoveryPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            on_malformed: RecoveryPolicy::default(),
        }
    }
}

/// `<platform data dir>/disc-catalog/catalogs.json`, or `./catalogs.json`
/// when no home directory can be found
pub fn default_document_path() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join("catalogs.json"))
        .unwrap_or_else(|| PathBuf::from("catalogs.json"))
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Storage(String),
    Scan(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl CatalogConfig {
    /// Validate the entire configuration, reporting every problem found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.document_path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Document path cannot be empty".to_string(),
            ));
        }

        if self.scan.ignore_patterns.iter().any(|p| p.trim().is_empty()) {
            errors.push(ValidationError::Scan(
                "Ignore patterns cannot be empty".to_string(),
            ));
        }
        if self.scan.max_depth == Some(0) {
            errors.push(ValidationError::Scan(
                "Max depth must be at least 1".to_string(),
            ));
        }

        if let Err(e) = logging::validate(&self.logging) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
