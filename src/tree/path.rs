//! Path splitting, joining and canonicalization utilities

use crate::error::CatalogError;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Split a path into the name segments used for tree insertion.
///
/// Root, prefix and `.` components carry no name and are skipped. `..` has no
/// meaning inside a catalog and is rejected.
pub fn segments(path: &Path) -> Result<Vec<String>, CatalogError> {
    let mut out = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => out.push(name.to_string_lossy().into_owned()),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(CatalogError::InvalidPath(format!(
                    "parent directory segment in {:?}",
                    path
                )));
            }
        }
    }
    Ok(out)
}

/// Append a name to a display path using the host separator.
///
/// No separator is doubled when the prefix already ends with one (root labels
/// such as `/` or `C:\`).
pub fn push_segment(buf: &mut String, name: &str) {
    if !buf.is_empty() && !buf.ends_with(['/', '\\']) {
        buf.push(MAIN_SEPARATOR);
    }
    buf.push_str(name);
}

/// Join names into a display path using the host separator
pub fn join<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut buf = String::new();
    for name in names {
        push_segment(&mut buf, name);
    }
    buf
}

/// Canonicalize a volume root for scanning
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, CatalogError> {
    dunce::canonicalize(path).map_err(|e| {
        CatalogError::InvalidPath(format!("Failed to canonicalize {:?}: {}", path, e))
    })
}

/// Label used for a catalog root: the path as text, trailing separators
/// removed (except for a bare root).
pub fn root_label(path: &Path) -> String {
    let mut label = path.to_string_lossy().into_owned();
    while label.len() > 1 && label.ends_with(['/', '\\']) {
        label.pop();
    }
    label
}
