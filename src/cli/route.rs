//! CLI route: single route table and run context.
//!
//! Each command loads the catalog document, runs against a
//! [`SharedCatalogStore`], and saves the document again if it changed.

use crate::cli::help::{command_name, is_mutating};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_catalog_list, format_find_hits, format_fuzzy_results, format_scan_summary,
    CatalogListRow,
};
use crate::config::{CatalogConfig, ConfigLoader};
use crate::error::CatalogError;
use crate::progress::ScanProgress;
use crate::search::DateRange;
use crate::store::shared::CatalogSearchHit;
use crate::store::SharedCatalogStore;
use crate::tree::{render, CatalogBuilder, NodeSummary, TimestampSource};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, info_span, warn};

/// Runtime context for CLI execution: resolved config and the async runtime.
pub struct RunContext {
    config: CatalogConfig,
    document_path: PathBuf,
    runtime: tokio::runtime::Runtime,
}

impl RunContext {
    /// Create run context from optional config and document paths.
    pub fn new(
        config_path: Option<PathBuf>,
        document_path: Option<PathBuf>,
    ) -> Result<Self, CatalogError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load()?,
        };
        Self::with_config(config, document_path)
    }

    /// Create run context from an already loaded config.
    pub fn with_config(
        config: CatalogConfig,
        document_path: Option<PathBuf>,
    ) -> Result<Self, CatalogError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            CatalogError::Config(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;

        let document_path = document_path.unwrap_or_else(|| config.storage.document_path.clone());
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("disc-catalog")
            .build()?;

        Ok(Self {
            config,
            document_path,
            runtime,
        })
    }

    pub fn document_path(&self) -> &PathBuf {
        &self.document_path
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, CatalogError> {
        let span = info_span!("command", name = command_name(command));
        let _entered = span.enter();

        self.runtime.block_on(async {
            let store = SharedCatalogStore::load(
                self.document_path.clone(),
                self.config.storage.on_malformed,
            )
            .await?;

            let output = self.execute_inner(&store, command).await?;

            if is_mutating(command) {
                store.save(self.document_path.clone()).await?;
            }
            Ok(output)
        })
    }

    async fn execute_inner(
        &self,
        store: &SharedCatalogStore,
        command: &Commands,
    ) -> Result<String, CatalogError> {
        match command {
            Commands::Scan {
                root,
                name,
                modified_times,
            } => {
                if store.find_by_name(name).is_some() {
                    return Err(CatalogError::DuplicateCatalog(name.clone()));
                }

                let mut scan = self.config.scan.clone();
                if *modified_times {
                    scan.timestamps = TimestampSource::Modified;
                }
                let progress = Arc::new(ScanProgress::new());
                let builder = CatalogBuilder::new(name.clone(), root.clone())
                    .with_walker_config(scan)
                    .with_observer(progress.clone());

                let (_, stats) = store.build(builder).await?;
                let snapshot = progress.snapshot();
                if snapshot.faults > 0 {
                    warn!(faults = snapshot.faults, "Scan finished with unreadable entries");
                }
                info!(catalog = %name, files = snapshot.scanned_files, "Scan added catalog");
                Ok(format_scan_summary(name, &stats))
            }

            Commands::List { format } => {
                let rows: Vec<CatalogListRow> = store
                    .to_store()
                    .catalogs()
                    .map(CatalogListRow::from)
                    .collect();
                format_catalog_list(&rows, *format)
            }

            Commands::Show { name } => {
                let (_, catalog) = store
                    .find_by_name(name)
                    .ok_or_else(|| CatalogError::CatalogNotFound(name.clone()))?;
                let outline = render::outline(&catalog.read().root);
                Ok(outline)
            }

            Commands::Sort { order, catalog } => match catalog {
                Some(name) => {
                    let (id, _) = store
                        .find_by_name(name)
                        .ok_or_else(|| CatalogError::CatalogNotFound(name.clone()))?;
                    store.sort(id, *order).await?;
                    Ok(format!("Sorted '{}' by {}", name, order.as_str()))
                }
                None => {
                    store.sort_all(*order).await?;
                    Ok(format!("Sorted {} catalogs", store.len()))
                }
            },

            Commands::Find {
                query,
                catalog,
                from,
                to,
                format,
            } => {
                let range = date_range(*from, *to)?;
                let hits = match catalog {
                    Some(name) => {
                        let (catalog_id, shared) = store
                            .find_by_name(name)
                            .ok_or_else(|| CatalogError::CatalogNotFound(name.clone()))?;
                        let catalog = shared.read();
                        let hit = crate::search::find_in(&catalog.root, query, range).map(|node| {
                            CatalogSearchHit {
                                catalog_id,
                                catalog_name: catalog.name.clone(),
                                node: NodeSummary::from(node),
                            }
                        });
                        hit.into_iter().collect()
                    }
                    None => store.find_first_all(query, range).await?,
                };
                format_find_hits(query, &hits, *format)
            }

            Commands::Fuzzy { query, format } => {
                let results = store.find_all_fuzzy_all(query).await?;
                format_fuzzy_results(query, &results, *format)
            }

            Commands::Remove { name } => {
                let (id, _) = store
                    .find_by_name(name)
                    .ok_or_else(|| CatalogError::CatalogNotFound(name.clone()))?;
                store.remove(id);
                Ok(format!("Removed '{}'", name))
            }
        }
    }
}

/// Inclusive range covering whole days; an open side extends without bound
fn date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Option<DateRange>, CatalogError> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let start = match from {
        Some(day) => {
            let first = day
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| CatalogError::InvalidArgument(format!("invalid start date {}", day)))?;
            Utc.from_utc_datetime(&first)
        }
        None => DateTime::<Utc>::MIN_UTC,
    };
    let end = match to {
        Some(day) => {
            let last = day
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .ok_or_else(|| CatalogError::InvalidArgument(format!("invalid end date {}", day)))?;
            Utc.from_utc_datetime(&last)
        }
        None => DateTime::<Utc>::MAX_UTC,
    };
    if start > end {
        return Err(CatalogError::InvalidArgument(
            "--from must not be later than --to".to_string(),
        ));
    }
    Ok(Some(DateRange::new(start, end)))
}
