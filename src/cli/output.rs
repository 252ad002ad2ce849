//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CatalogError;

/// Map domain errors to a message for CLI output, with a hint where one helps.
pub fn map_error(e: &CatalogError) -> String {
    match e {
        CatalogError::MalformedDocument { .. } => format!(
            "{}\nhint: set storage.on_malformed to \"skip_corrupt_entries\" or \"reset_to_empty\" to recover",
            e
        ),
        CatalogError::DuplicateCatalog(_) => {
            format!("{}\nhint: choose another --name or remove the existing catalog", e)
        }
        CatalogError::CatalogNotFound(_) => {
            format!("{}\nhint: run `disc-catalog list` to see catalog names", e)
        }
        _ => e.to_string(),
    }
}
