//! Exact lookup by name, first match in pre-order

use crate::tree::traversal;
use crate::tree::{Catalog, Node};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

/// Inclusive range of timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Both bounds included
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// First node named exactly `name`, in pre-order starting at the root.
///
/// Short-circuits: a deeper match reached earlier wins over a shallower one
/// further along.
pub fn find_first<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a Node> {
    find_in(&catalog.root, name, None)
}

/// Like [`find_first`], restricted to nodes whose timestamp lies within
/// `start..=end`. Applies to directories and files alike.
pub fn find_first_within<'a>(
    catalog: &'a Catalog,
    name: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<&'a Node> {
    find_in(&catalog.root, name, Some(DateRange::new(start, end)))
}

/// Exact lookup with an optional date filter
pub fn find_in<'a>(root: &'a Node, name: &str, range: Option<DateRange>) -> Option<&'a Node> {
    traversal::walk(root, |node, _| {
        let in_range = range.map_or(true, |r| r.contains(node.timestamp));
        if node.name == name && in_range {
            ControlFlow::Break(node)
        } else {
            ControlFlow::Continue(())
        }
    })
}
