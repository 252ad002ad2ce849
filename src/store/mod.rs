//! Catalog Store
//!
//! Ordered collection of named catalogs, and the whole-store operations that
//! fan work out over every catalog (sort, search, persist).

pub mod persistence;
pub mod shared;

pub use persistence::RecoveryPolicy;
pub use shared::SharedCatalogStore;

use crate::error::CatalogError;
use crate::search::{self, DateRange, FuzzyMatch};
use crate::sort::{self, SortOrder};
use crate::tree::{Catalog, Node};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Identity of a catalog inside one store.
///
/// Assigned on insertion and never reused by that store; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId(u64);

impl CatalogId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Exact-search hit in one catalog
#[derive(Debug, Clone, Copy)]
pub struct CatalogHit<'a> {
    pub catalog_id: CatalogId,
    pub catalog_name: &'a str,
    pub node: &'a Node,
}

/// Fuzzy-search matches of one catalog
#[derive(Debug, Clone)]
pub struct CatalogMatches<'a> {
    pub catalog_id: CatalogId,
    pub catalog_name: &'a str,
    pub matches: Vec<FuzzyMatch<'a>>,
}

/// Ordered collection of catalogs.
///
/// Name uniqueness is the caller's business: [`CatalogStore::add`] accepts
/// duplicates, [`CatalogStore::try_add`] refuses them.
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<(CatalogId, Catalog)>,
    next_id: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `catalogs` in order
    pub fn from_catalogs(catalogs: impl IntoIterator<Item = Catalog>) -> Self {
        let mut store = Self::new();
        for catalog in catalogs {
            store.add(catalog);
        }
        store
    }

    fn allocate_id(&mut self) -> CatalogId {
        let id = CatalogId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a catalog
    pub fn add(&mut self, catalog: Catalog) -> CatalogId {
        let id = self.allocate_id();
        debug!(catalog = %catalog.name, %id, "Catalog added");
        self.entries.push((id, catalog));
        id
    }

    /// Append a catalog unless one with the same name exists
    pub fn try_add(&mut self, catalog: Catalog) -> Result<CatalogId, CatalogError> {
        if self.contains_name(&catalog.name) {
            return Err(CatalogError::DuplicateCatalog(catalog.name));
        }
        Ok(self.add(catalog))
    }

    /// Remove the catalog with this identity
    pub fn remove(&mut self, id: CatalogId) -> Option<Catalog> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        let (_, catalog) = self.entries.remove(index);
        debug!(catalog = %catalog.name, %id, "Catalog removed");
        Some(catalog)
    }

    pub fn get(&self, id: CatalogId) -> Option<&Catalog> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, catalog)| catalog)
    }

    pub fn get_mut(&mut self, id: CatalogId) -> Option<&mut Catalog> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, catalog)| catalog)
    }

    /// First catalog with this name
    pub fn find_by_name(&self, name: &str) -> Option<(CatalogId, &Catalog)> {
        self.entries
            .iter()
            .find(|(_, catalog)| catalog.name == name)
            .map(|(id, catalog)| (*id, catalog))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CatalogId, &Catalog)> {
        self.entries.iter().map(|(id, catalog)| (*id, catalog))
    }

    pub fn catalogs(&self) -> impl Iterator<Item = &Catalog> {
        self.entries.iter().map(|(_, catalog)| catalog)
    }

    pub fn names(&self) -> Vec<&str> {
        self.catalogs().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_catalogs(self) -> Vec<Catalog> {
        self.entries.into_iter().map(|(_, catalog)| catalog).collect()
    }

    /// Sort every catalog, one after another
    pub fn sort_all(&mut self, order: SortOrder) {
        for (_, catalog) in &mut self.entries {
            sort::sort_catalog(catalog, order);
        }
    }

    /// Exact lookup in every catalog; catalogs without a hit are left out
    pub fn find_first_all(&self, name: &str, range: Option<DateRange>) -> Vec<CatalogHit<'_>> {
        self.iter()
            .filter_map(|(catalog_id, catalog)| {
                search::find_in(&catalog.root, name, range).map(|node| CatalogHit {
                    catalog_id,
                    catalog_name: &catalog.name,
                    node,
                })
            })
            .collect()
    }

    /// Fuzzy lookup in every catalog, in catalog order
    pub fn find_all_fuzzy_all(&self, query: &str) -> Vec<CatalogMatches<'_>> {
        self.iter()
            .map(|(catalog_id, catalog)| CatalogMatches {
                catalog_id,
                catalog_name: &catalog.name,
                matches: search::find_all_fuzzy(catalog, query),
            })
            .collect()
    }

    /// Write the whole store to `path`
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        persistence::save_to_path(self.catalogs(), path)
    }

    /// Read a store from `path`; a missing document gives an empty store
    pub fn load(path: &Path, policy: RecoveryPolicy) -> Result<Self, CatalogError> {
        let catalogs = persistence::load_from_path(path, policy)?;
        let store = Self::from_catalogs(catalogs);
        info!(catalogs = store.len(), path = %path.display(), "Catalog store loaded");
        Ok(store)
    }
}
