//! Catalog tree
//!
//! Represents one volume as an owned tree of directory and file nodes, built
//! incrementally by path insertion.

pub mod builder;
pub mod catalog;
pub mod node;
pub mod path;
pub mod render;
pub mod traversal;
pub mod walker;

pub use builder::{BuildOutcome, BuildStats, CatalogBuilder};
pub use catalog::Catalog;
pub use node::{Node, NodeKind, NodeSummary};
pub use walker::{ScanFault, TimestampSource, WalkerConfig};
