//! Recursive in-place ordering of catalog trees

use crate::tree::traversal;
use crate::tree::{Catalog, Node};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Key children are ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending name, byte-wise and case-sensitive
    Name,
    /// Ascending timestamp
    Date,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Name => "name",
            SortOrder::Date => "date",
        }
    }

    fn compare(self, a: &Node, b: &Node) -> Ordering {
        match self {
            SortOrder::Name => a.name.cmp(&b.name),
            SortOrder::Date => a.timestamp.cmp(&b.timestamp),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "alphabetical" => Ok(SortOrder::Name),
            "date" => Ok(SortOrder::Date),
            other => Err(format!("unknown sort order '{}' (expected name or date)", other)),
        }
    }
}

/// Reorder every node's children, at every depth.
///
/// The sort is stable: nodes with equal keys keep their relative order.
#[instrument(skip(catalog), fields(catalog = %catalog.name))]
pub fn sort_catalog(catalog: &mut Catalog, order: SortOrder) {
    sort_tree(&mut catalog.root, order);
    debug!(?order, "Catalog sorted");
}

pub fn sort_by_name(catalog: &mut Catalog) {
    sort_catalog(catalog, SortOrder::Name);
}

pub fn sort_by_date(catalog: &mut Catalog) {
    sort_catalog(catalog, SortOrder::Date);
}

/// Sort a subtree in place
pub fn sort_tree(root: &mut Node, order: SortOrder) {
    traversal::walk_mut(root, |node| {
        node.children.sort_by(|a, b| order.compare(a, b));
    });
}
