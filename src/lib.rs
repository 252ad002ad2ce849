//! Disc Catalog: searchable catalogs of storage volumes
//!
//! Builds an in-memory tree of every directory and file on a volume, keeps
//! many such catalogs side by side, sorts and searches them (exact and
//! typo-tolerant), and persists the whole collection as one JSON document.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod search;
pub mod sort;
pub mod store;
pub mod tree;

pub use error::CatalogError;
pub use progress::{NoopProgress, ProgressObserver, ScanProgress};
pub use search::{DateRange, FuzzyMatch, MatchRecord};
pub use sort::SortOrder;
pub use store::{CatalogId, CatalogStore, RecoveryPolicy, SharedCatalogStore};
pub use tree::{Catalog, CatalogBuilder, Node, NodeKind};
