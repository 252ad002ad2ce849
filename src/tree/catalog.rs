//! Catalog: a named tree of one volume's directories and files

use crate::error::CatalogError;
use crate::tree::node::Node;
use crate::tree::path;
use crate::tree::traversal::{self, TreeStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// A named snapshot of one volume's full directory/file tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    pub root: Node,
}

impl Catalog {
    /// Create a catalog whose root directory carries `root_name`
    pub fn new(name: impl Into<String>, root_name: impl Into<String>) -> Self {
        Self::with_root(name, Node::directory(root_name, Utc::now()))
    }

    pub fn with_root(name: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Insert a directory path below the root, reusing existing directories.
    ///
    /// Idempotent: inserting the same path again creates no nodes.
    pub fn insert_directory(&mut self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        self.insert_directory_at(path, Utc::now())
    }

    /// Like [`Catalog::insert_directory`], stamping created nodes with `timestamp`
    pub fn insert_directory_at(
        &mut self,
        path: impl AsRef<Path>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), CatalogError> {
        let segments = path::segments(path.as_ref())?;
        descend_or_create(&mut self.root, &segments, timestamp);
        Ok(())
    }

    /// Insert a file path below the root.
    ///
    /// Missing parent directories are created. The file node is appended
    /// unconditionally, so inserting the same path twice yields two siblings.
    pub fn insert_file(&mut self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        self.insert_file_at(path, Utc::now())
    }

    /// Like [`Catalog::insert_file`], stamping created nodes with `timestamp`
    pub fn insert_file_at(
        &mut self,
        path: impl AsRef<Path>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let mut segments = path::segments(path)?;
        let file_name = segments.pop().ok_or_else(|| {
            CatalogError::InvalidPath(format!("no file name in {:?}", path))
        })?;

        let parent = descend_or_create(&mut self.root, &segments, timestamp);
        trace!(file = %file_name, depth = segments.len(), "Inserting file node");
        parent.children.push(Node::file(file_name, timestamp));
        Ok(())
    }

    /// Directory and file counts, root included
    pub fn stats(&self) -> TreeStats {
        traversal::stats(&self.root)
    }
}

/// Walk `segments` from `node`, creating missing directories, and return the
/// directory reached.
fn descend_or_create<'a>(
    mut node: &'a mut Node,
    segments: &[String],
    timestamp: DateTime<Utc>,
) -> &'a mut Node {
    for segment in segments {
        let index = match node.child_directory_position(segment) {
            Some(index) => index,
            None => {
                node.children.push(Node::directory(segment.clone(), timestamp));
                node.children.len() - 1
            }
        };
        node = &mut node.children[index];
    }
    node
}
