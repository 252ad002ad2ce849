//! Catalog search
//!
//! Exact lookup returns the first node with a given name (optionally inside a
//! date range); fuzzy lookup returns every file within a fixed edit distance
//! of the query, each with its full path.

pub mod distance;
pub mod exact;
pub mod fuzzy;

pub use distance::edit_distance;
pub use exact::{find_first, find_first_within, find_in, DateRange};
pub use fuzzy::{find_all_fuzzy, find_all_fuzzy_in, FuzzyMatch, MatchRecord, FUZZY_MAX_DISTANCE};
