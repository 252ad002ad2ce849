//! Catalog builder: full traversal of a volume into a catalog tree

use crate::error::CatalogError;
use crate::progress::{NoopProgress, ProgressObserver};
use crate::tree::catalog::Catalog;
use crate::tree::node::Node;
use crate::tree::path;
use crate::tree::walker::{ScanFault, TimestampSource, WalkEvent, Walker, WalkerConfig};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, trace};

/// Result of a completed build
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub catalog: Catalog,
    pub stats: BuildStats,
}

/// Counters and faults collected while building
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    pub directories: usize,
    pub files: usize,
    pub faults: Vec<ScanFault>,
    pub duration: Duration,
}

/// Builds a catalog by walking a volume root
pub struct CatalogBuilder {
    name: String,
    root: PathBuf,
    walker_config: WalkerConfig,
    observer: Arc<dyn ProgressObserver>,
    cancel: Option<Arc<AtomicBool>>,
}

impl CatalogBuilder {
    /// Create a builder for a catalog called `name` over the volume at `root`
    pub fn new(name: impl Into<String>, root: PathBuf) -> Self {
        Self {
            name: name.into(),
            root,
            walker_config: WalkerConfig::default(),
            observer: Arc::new(NoopProgress),
            cancel: None,
        }
    }

    /// Set walker config (ignore patterns, depth, timestamps)
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Abort the build once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Walk the volume and build the catalog.
    ///
    /// Directories that cannot be read are recorded as faults and skipped;
    /// only a missing or unreadable root fails the build.
    #[instrument(skip(self), fields(catalog = %self.name, root = %self.root.display()))]
    pub fn build(&self) -> Result<BuildOutcome, CatalogError> {
        let start = Instant::now();
        info!("Starting catalog build");

        if !self.root.is_dir() {
            error!("Volume root is not a directory");
            return Err(CatalogError::RootNotFound(self.root.clone()));
        }
        let canonical_root = path::canonicalize_path(&self.root)?;

        let timestamps = self.walker_config.timestamps;
        let root_stamp = match timestamps {
            TimestampSource::Scan => Utc::now(),
            TimestampSource::Modified => std::fs::metadata(&canonical_root)
                .and_then(|m| m.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now()),
        };
        let mut catalog = Catalog::with_root(
            self.name.clone(),
            Node::directory(path::root_label(&canonical_root), root_stamp),
        );
        let mut stats = BuildStats::default();

        self.observer.on_started(&canonical_root);

        let mut walker = Walker::with_config(canonical_root, self.walker_config.clone());
        if let Some(flag) = &self.cancel {
            walker = walker.with_cancel(flag.clone());
        }

        let walked = walker.walk(|event| {
            match event {
                WalkEvent::Directory { relative, modified } => {
                    trace!(path = %relative.display(), "Directory");
                    catalog.insert_directory_at(&relative, stamp(timestamps, modified))?;
                    stats.directories += 1;
                    self.observer.on_directory(&relative);
                }
                WalkEvent::File { relative, modified } => {
                    catalog.insert_file_at(&relative, stamp(timestamps, modified))?;
                    stats.files += 1;
                    self.observer.on_file(&relative);
                }
                WalkEvent::Fault(fault) => {
                    self.observer.on_fault(&fault);
                    stats.faults.push(fault);
                }
            }
            Ok(())
        });

        self.observer.on_finished();
        if let Err(e) = walked {
            error!("Catalog build failed: {}", e);
            return Err(e);
        }

        stats.duration = start.elapsed();
        info!(
            directories = stats.directories,
            files = stats.files,
            faults = stats.faults.len(),
            duration_ms = stats.duration.as_millis(),
            "Catalog build completed"
        );

        Ok(BuildOutcome { catalog, stats })
    }
}

fn stamp(source: TimestampSource, modified: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match (source, modified) {
        (TimestampSource::Modified, Some(modified)) => modified,
        _ => Utc::now(),
    }
}
