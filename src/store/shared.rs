//! Shared catalog store for concurrent use.
//!
//! Each catalog sits behind its own `RwLock`, so searches over different
//! catalogs never contend and a sort only blocks the catalog it touches.
//! Tree work is CPU bound and runs on the blocking pool; fan-out searches run
//! one task per catalog and are joined in catalog order.

use crate::error::CatalogError;
use crate::search::{self, DateRange, MatchRecord};
use crate::sort::{self, SortOrder};
use crate::store::persistence::{self, RecoveryPolicy};
use crate::store::{CatalogId, CatalogStore};
use crate::tree::{BuildStats, Catalog, CatalogBuilder, NodeSummary};
use futures::future::join_all;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub type SharedCatalog = Arc<RwLock<Catalog>>;

/// Exact-search hit, owned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSearchHit {
    pub catalog_id: CatalogId,
    pub catalog_name: String,
    pub node: NodeSummary,
}

/// Fuzzy-search matches of one catalog, owned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatchRecords {
    pub catalog_id: CatalogId,
    pub catalog_name: String,
    pub matches: Vec<MatchRecord>,
}

#[derive(Default)]
struct Inner {
    entries: RwLock<Vec<(CatalogId, SharedCatalog)>>,
    next_id: AtomicU64,
}

/// Cloneable handle to a set of catalogs shared between tasks
#[derive(Clone, Default)]
pub struct SharedCatalogStore {
    inner: Arc<Inner>,
}

impl SharedCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a catalog
    pub fn add(&self, catalog: Catalog) -> CatalogId {
        let id = CatalogId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(catalog = %catalog.name, %id, "Catalog added");
        self.inner
            .entries
            .write()
            .push((id, Arc::new(RwLock::new(catalog))));
        id
    }

    /// Append a catalog unless one with the same name exists
    pub fn try_add(&self, catalog: Catalog) -> Result<CatalogId, CatalogError> {
        let mut entries = self.inner.entries.write();
        if entries.iter().any(|(_, c)| c.read().name == catalog.name) {
            return Err(CatalogError::DuplicateCatalog(catalog.name));
        }
        let id = CatalogId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(catalog = %catalog.name, %id, "Catalog added");
        entries.push((id, Arc::new(RwLock::new(catalog))));
        Ok(id)
    }

    /// Remove a catalog.
    ///
    /// Tasks still holding the catalog finish on their own copy.
    pub fn remove(&self, id: CatalogId) -> Option<Catalog> {
        let shared = {
            let mut entries = self.inner.entries.write();
            let index = entries.iter().position(|(entry_id, _)| *entry_id == id)?;
            entries.remove(index).1
        };
        let catalog = match Arc::try_unwrap(shared) {
            Ok(lock) => lock.into_inner(),
            Err(shared) => {
                let copy = shared.read().clone();
                copy
            }
        };
        debug!(catalog = %catalog.name, %id, "Catalog removed");
        Some(catalog)
    }

    pub fn get(&self, id: CatalogId) -> Option<SharedCatalog> {
        self.inner
            .entries
            .read()
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, catalog)| catalog.clone())
    }

    /// First catalog with this name
    pub fn find_by_name(&self, name: &str) -> Option<(CatalogId, SharedCatalog)> {
        self.inner
            .entries
            .read()
            .iter()
            .find(|(_, catalog)| catalog.read().name == name)
            .map(|(id, catalog)| (*id, catalog.clone()))
    }

    pub fn names(&self) -> Vec<(CatalogId, String)> {
        self.inner
            .entries
            .read()
            .iter()
            .map(|(id, catalog)| (*id, catalog.read().name.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current membership; the store lock is released on return
    fn snapshot(&self) -> Vec<(CatalogId, SharedCatalog)> {
        self.inner.entries.read().clone()
    }

    /// Copy every catalog out into a plain store
    pub fn to_store(&self) -> CatalogStore {
        CatalogStore::from_catalogs(
            self.snapshot()
                .into_iter()
                .map(|(_, catalog)| {
                    let copy = catalog.read().clone();
                    copy
                }),
        )
    }

    /// Run a build on the blocking pool and add the result.
    ///
    /// The catalog is only added once the build succeeds.
    #[instrument(skip(self, builder))]
    pub async fn build(
        &self,
        builder: CatalogBuilder,
    ) -> Result<(CatalogId, BuildStats), CatalogError> {
        let outcome = tokio::task::spawn_blocking(move || builder.build()).await??;
        let id = self.add(outcome.catalog);
        Ok((id, outcome.stats))
    }

    /// Sort one catalog; false when the id is unknown
    pub async fn sort(&self, id: CatalogId, order: SortOrder) -> Result<bool, CatalogError> {
        let Some(catalog) = self.get(id) else {
            return Ok(false);
        };
        tokio::task::spawn_blocking(move || {
            let mut catalog = catalog.write();
            sort::sort_catalog(&mut catalog, order);
        })
        .await?;
        Ok(true)
    }

    /// Sort every catalog, one at a time
    #[instrument(skip(self))]
    pub async fn sort_all(&self, order: SortOrder) -> Result<(), CatalogError> {
        for (_, catalog) in self.snapshot() {
            tokio::task::spawn_blocking(move || {
                let mut catalog = catalog.write();
                sort::sort_catalog(&mut catalog, order);
            })
            .await?;
        }
        Ok(())
    }

    /// Exact lookup in every catalog concurrently.
    ///
    /// Hits come back in catalog order; catalogs without a hit are left out.
    #[instrument(skip(self))]
    pub async fn find_first_all(
        &self,
        name: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<CatalogSearchHit>, CatalogError> {
        let tasks = self.snapshot().into_iter().map(|(catalog_id, catalog)| {
            let name = name.to_string();
            tokio::task::spawn_blocking(move || {
                let catalog = catalog.read();
                let hit = search::find_in(&catalog.root, &name, range).map(|node| {
                    CatalogSearchHit {
                        catalog_id,
                        catalog_name: catalog.name.clone(),
                        node: NodeSummary::from(node),
                    }
                });
                hit
            })
        });

        let mut hits = Vec::new();
        for joined in join_all(tasks).await {
            if let Some(hit) = joined? {
                hits.push(hit);
            }
        }
        debug!(hits = hits.len(), "Exact search finished");
        Ok(hits)
    }

    /// Fuzzy lookup in every catalog concurrently, one entry per catalog
    #[instrument(skip(self))]
    pub async fn find_all_fuzzy_all(
        &self,
        query: &str,
    ) -> Result<Vec<CatalogMatchRecords>, CatalogError> {
        let tasks = self.snapshot().into_iter().map(|(catalog_id, catalog)| {
            let query = query.to_string();
            tokio::task::spawn_blocking(move || {
                let catalog = catalog.read();
                let matches: Vec<MatchRecord> = search::find_all_fuzzy(&catalog, &query)
                    .iter()
                    .map(|m| m.to_record())
                    .collect();
                CatalogMatchRecords {
                    catalog_id,
                    catalog_name: catalog.name.clone(),
                    matches,
                }
            })
        });

        let results = join_all(tasks)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            matches = results.iter().map(|r| r.matches.len()).sum::<usize>(),
            "Fuzzy search finished"
        );
        Ok(results)
    }

    /// Write every catalog to `path`
    pub async fn save(&self, path: PathBuf) -> Result<(), CatalogError> {
        let entries = self.snapshot();
        tokio::task::spawn_blocking(move || {
            let guards: Vec<_> = entries.iter().map(|(_, catalog)| catalog.read()).collect();
            let saved = persistence::save_to_path(guards.iter().map(|guard| &**guard), &path);
            saved
        })
        .await?
    }

    /// Read a store from `path`; a missing document gives an empty store
    pub async fn load(path: PathBuf, policy: RecoveryPolicy) -> Result<Self, CatalogError> {
        let catalogs =
            tokio::task::spawn_blocking(move || persistence::load_from_path(&path, policy))
                .await??;
        let store = Self::from(CatalogStore::from_catalogs(catalogs));
        info!(catalogs = store.len(), "Shared catalog store loaded");
        Ok(store)
    }
}

impl From<CatalogStore> for SharedCatalogStore {
    /// Identities carry over from the plain store
    fn from(store: CatalogStore) -> Self {
        let entries = store
            .entries
            .into_iter()
            .map(|(id, catalog)| (id, Arc::new(RwLock::new(catalog))))
            .collect();
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(entries),
                next_id: AtomicU64::new(store.next_id),
            }),
        }
    }
}
