//! Environment variable source: DISC_CATALOG prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "DISC_CATALOG";

/// Add environment variable overlay to builder.
///
/// `DISC_CATALOG__STORAGE__DOCUMENT_PATH=/tmp/c.json` sets
/// `storage.document_path`; `scan.ignore_patterns` takes a comma separated list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("scan.ignore_patterns")
            .try_parsing(true),
    ))
}
