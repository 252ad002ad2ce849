//! Merge rules: defaults and override order.
//!
//! Sources are layered lowest to highest: defaults, global file, environment.

use crate::config::default_document_path;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default(
            "storage.document_path",
            default_document_path().to_string_lossy().to_string(),
        )?
        .set_default("storage.on_malformed", "fail")?
        .set_default("scan.follow_symlinks", false)?
        .set_default("scan.timestamps", "scan")?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
