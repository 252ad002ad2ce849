//! Catalog node types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of filesystem entry a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Directory => "Directory",
            NodeKind::File => "File",
        }
    }
}

/// One entry of a catalog tree.
///
/// A node exclusively owns its children. File nodes never receive children
/// from the engine, though the type does not forbid them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn directory(name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            timestamp,
            children: Vec::new(),
        }
    }

    pub fn file(name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            timestamp,
            children: Vec::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Find a direct child directory by exact name
    pub fn child_directory(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|child| child.is_directory() && child.name == name)
    }

    /// Index of the first child directory with this exact name
    pub(crate) fn child_directory_position(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.is_directory() && child.name == name)
    }
}

/// Owned header of a node, without its subtree.
///
/// Used where a result has to outlive the lock guarding the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub name: String,
    pub kind: NodeKind,
    pub timestamp: DateTime<Utc>,
    pub child_count: usize,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            kind: node.kind,
            timestamp: node.timestamp,
            child_count: node.children.len(),
        }
    }
}
