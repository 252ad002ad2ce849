//! ConfigLoader: orchestrates sources, applies merge policy, deserializes to CatalogConfig.

use super::merge::merge_policy;
use super::sources::{environment, global_file};
use super::CatalogConfig;
use crate::error::CatalogError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    ///
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<CatalogConfig, CatalogError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config: CatalogConfig = builder.build()?.try_deserialize()?;
        debug!(document = %config.storage.document_path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    ///
    /// The global file is not consulted.
    pub fn load_from_file(path: &Path) -> Result<CatalogConfig, CatalogError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config: CatalogConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }
}
