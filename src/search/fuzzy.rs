//! Typo-tolerant lookup of files by name

use crate::search::distance::edit_distance;
use crate::tree::path;
use crate::tree::traversal;
use crate::tree::{Catalog, Node, NodeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

/// Largest edit distance still counted as a match
pub const FUZZY_MAX_DISTANCE: usize = 2;

/// A file node close to the query, with its full path from the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    pub node: &'a Node,
    pub path: String,
}

impl FuzzyMatch<'_> {
    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            name: self.node.name.clone(),
            kind: self.node.kind,
            timestamp: self.node.timestamp,
            path: self.path.clone(),
        }
    }
}

/// Owned copy of a match, detached from the tree it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub name: String,
    pub kind: NodeKind,
    pub timestamp: DateTime<Utc>,
    pub path: String,
}

/// Every file whose name is within [`FUZZY_MAX_DISTANCE`] of `query`.
///
/// Scans the whole tree; directories are walked through but never matched.
/// Results come in pre-order.
pub fn find_all_fuzzy<'a>(catalog: &'a Catalog, query: &str) -> Vec<FuzzyMatch<'a>> {
    find_all_fuzzy_in(&catalog.root, query)
}

pub fn find_all_fuzzy_in<'a>(root: &'a Node, query: &str) -> Vec<FuzzyMatch<'a>> {
    let mut matches = Vec::new();
    traversal::walk::<()>(root, |node, ancestors| {
        if node.kind == NodeKind::File && edit_distance(&node.name, query) <= FUZZY_MAX_DISTANCE {
            let path = path::join(
                ancestors
                    .iter()
                    .map(|a| a.name.as_str())
                    .chain(std::iter::once(node.name.as_str())),
            );
            matches.push(FuzzyMatch { node, path });
        }
        ControlFlow::Continue(())
    });
    matches
}
