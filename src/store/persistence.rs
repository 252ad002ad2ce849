//! Catalog document codec.
//!
//! A store is persisted as one JSON array with one object per catalog:
//!
//! ```json
//! [
//!   {
//!     "name": "Backup 2023",
//!     "root": {
//!       "name": "C:",
//!       "kind": "Directory",
//!       "timestamp": "2023-05-01T10:00:00Z",
//!       "children": [ ... ]
//!     }
//!   }
//! ]
//! ```
//!
//! Writes go through a temporary sibling file and a rename, so a crash never
//! leaves a half-written document behind.

use crate::error::CatalogError;
use crate::tree::traversal;
use crate::tree::Catalog;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// What to do when a document cannot be decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPolicy {
    /// Report the document as malformed
    #[default]
    Fail,
    /// Drop catalog entries that do not decode, keep the rest.
    ///
    /// A document that is not a JSON array still fails.
    SkipCorruptEntries,
    /// Treat any malformed document as an empty store
    ResetToEmpty,
}

impl std::str::FromStr for RecoveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(RecoveryPolicy::Fail),
            "skip_corrupt_entries" | "skip" => Ok(RecoveryPolicy::SkipCorruptEntries),
            "reset_to_empty" | "reset" => Ok(RecoveryPolicy::ResetToEmpty),
            other => Err(format!("unknown recovery policy '{}'", other)),
        }
    }
}

/// Encode catalogs as an indented JSON array
pub fn encode<'a, W: Write>(
    catalogs: impl IntoIterator<Item = &'a Catalog>,
    writer: W,
) -> Result<(), CatalogError> {
    let mut serializer = serde_json::Serializer::pretty(writer);
    (&mut serializer)
        .collect_seq(catalogs)
        .map_err(|e| CatalogError::Serialization(e.to_string()))
}

/// Encode catalogs into a string
pub fn encode_to_string<'a>(
    catalogs: impl IntoIterator<Item = &'a Catalog>,
) -> Result<String, CatalogError> {
    let mut buffer = Vec::new();
    encode(catalogs, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| CatalogError::Serialization(e.to_string()))
}

/// Decode a document read from `reader`.
///
/// `origin` only names the document in errors and logs.
pub fn decode<R: Read>(
    reader: R,
    policy: RecoveryPolicy,
    origin: &Path,
) -> Result<Vec<Catalog>, CatalogError> {
    if policy == RecoveryPolicy::Fail {
        return read_document::<Vec<Catalog>, _>(reader)
            .map_err(|e| malformed(origin, e.to_string()));
    }

    let document: Value = match read_document(reader) {
        Ok(document) => document,
        Err(e) => return recover_whole(origin, policy, e.to_string()),
    };
    let items = match document {
        Value::Array(items) => items,
        other => {
            let reason = format!("expected an array of catalogs, found {}", json_type(&other));
            return recover_whole(origin, policy, reason);
        }
    };

    let mut catalogs = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match Catalog::deserialize(serde_stacker::Deserializer::new(item)) {
            Ok(catalog) => catalogs.push(catalog),
            Err(e) if policy == RecoveryPolicy::SkipCorruptEntries => {
                warn!(
                    path = %origin.display(),
                    entry = index,
                    error = %e,
                    "Skipping corrupt catalog entry"
                );
            }
            Err(e) => {
                return recover_whole(origin, policy, format!("entry {}: {}", index, e));
            }
        }
    }
    Ok(catalogs)
}

/// Parse a whole document with no nesting limit.
///
/// Every tree level costs two levels of JSON nesting, so the parser's default
/// limit would reject catalogs of ordinary deep volumes. The stack grows on
/// demand instead.
fn read_document<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Decode a document held in memory
pub fn decode_str(
    document: &str,
    policy: RecoveryPolicy,
    origin: &Path,
) -> Result<Vec<Catalog>, CatalogError> {
    decode(document.as_bytes(), policy, origin)
}

/// Write catalogs to `path`, replacing any previous document atomically
pub fn save_to_path<'a>(
    catalogs: impl IntoIterator<Item = &'a Catalog>,
    path: &Path,
) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let catalogs: Vec<&Catalog> = catalogs.into_iter().collect();
    let node_count: usize = catalogs
        .iter()
        .map(|c| traversal::stats(&c.root).total())
        .sum();

    let temp_path = path.with_extension("json.tmp");
    let written = write_document(&catalogs, &temp_path);
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!(
        path = %path.display(),
        catalogs = catalogs.len(),
        nodes = node_count,
        "Catalog document saved"
    );
    Ok(())
}

fn write_document(catalogs: &[&Catalog], temp_path: &Path) -> Result<(), CatalogError> {
    let file = File::create(temp_path)?;
    let mut writer = BufWriter::new(file);
    encode(catalogs.iter().copied(), &mut writer)?;
    writer.write_all(b"\n")?;
    let file = writer
        .into_inner()
        .map_err(|e| CatalogError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(())
}

/// Read catalogs from `path`.
///
/// A document that does not exist yet is an empty store.
pub fn load_from_path(path: &Path, policy: RecoveryPolicy) -> Result<Vec<Catalog>, CatalogError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No catalog document, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    decode(BufReader::new(file), policy, path)
}

fn recover_whole(
    origin: &Path,
    policy: RecoveryPolicy,
    reason: String,
) -> Result<Vec<Catalog>, CatalogError> {
    if policy == RecoveryPolicy::ResetToEmpty {
        warn!(path = %origin.display(), %reason, "Malformed catalog document, resetting to empty");
        return Ok(Vec::new());
    }
    Err(malformed(origin, reason))
}

fn malformed(origin: &Path, reason: String) -> CatalogError {
    CatalogError::MalformedDocument {
        path: origin.to_path_buf(),
        reason,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
