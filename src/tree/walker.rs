//! Volume walker for traversing directory structures

use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Where node timestamps come from during a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    /// Time the node was created in the catalog
    #[default]
    Scan,
    /// Filesystem modification time, scan time when unavailable
    Modified,
}

/// One event produced while walking a volume
#[derive(Debug, Clone)]
pub enum WalkEvent {
    /// A directory, path relative to the volume root
    Directory {
        relative: PathBuf,
        modified: Option<DateTime<Utc>>,
    },
    /// A file, path relative to the volume root
    File {
        relative: PathBuf,
        modified: Option<DateTime<Utc>>,
    },
    /// An entry or directory that could not be read; the walk goes on
    Fault(ScanFault),
}

/// A per-entry access failure recorded during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFault {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Volume walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Entry names to skip, together with their subtrees
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub timestamps: TimestampSource,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            max_depth: None,
            timestamps: TimestampSource::Scan,
        }
    }
}

/// Volume walker.
///
/// Yields a depth-first pre-order stream: a directory, then the full subtrees
/// of its subdirectories, then its files. Each group is in file-name order.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
            cancel: None,
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self {
            root,
            config,
            cancel: None,
        }
    }

    /// Stop the walk once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Walk the volume, handing every event to `on_event`.
    ///
    /// The root itself is not reported. Failing to read the root is fatal;
    /// any failure below it becomes a [`WalkEvent::Fault`].
    pub fn walk(
        &self,
        mut on_event: impl FnMut(WalkEvent) -> Result<(), CatalogError>,
    ) -> Result<(), CatalogError> {
        let want_modified = self.config.timestamps == TimestampSource::Modified;

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by(directories_first)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.should_ignore(entry));

        for item in walker {
            if self.is_cancelled() {
                debug!(root = %self.root.display(), "Walk cancelled");
                return Err(CatalogError::Cancelled);
            }

            let entry = match item {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(root_error(&self.root, err));
                }
                Err(err) => {
                    let fault = ScanFault {
                        path: err.path().map(Path::to_path_buf),
                        message: err.to_string(),
                    };
                    warn!(path = ?fault.path, error = %fault.message, "Skipping unreadable entry");
                    on_event(WalkEvent::Fault(fault))?;
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => {
                    on_event(WalkEvent::Fault(ScanFault {
                        path: Some(entry.path().to_path_buf()),
                        message: "entry outside of volume root".to_string(),
                    }))?;
                    continue;
                }
            };

            let modified = if want_modified {
                modified_time(&entry)
            } else {
                None
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                on_event(WalkEvent::Directory { relative, modified })?;
            } else if file_type.is_file() {
                on_event(WalkEvent::File { relative, modified })?;
            }
            // Symlinks that are not followed are neither files nor directories
        }

        Ok(())
    }

    /// Check if an entry's name matches an ignore pattern
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(AtomicOrdering::Relaxed))
            .unwrap_or(false)
    }
}

/// Directories before files, then by file name
fn directories_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn modified_time(entry: &DirEntry) -> Option<DateTime<Utc>> {
    entry
        .metadata()
        .ok()
        .and_then(|metadata| metadata.modified().ok())
        .map(DateTime::<Utc>::from)
}

fn root_error(root: &Path, err: walkdir::Error) -> CatalogError {
    match err.into_io_error() {
        Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
            CatalogError::RootNotFound(root.to_path_buf())
        }
        Some(io) => CatalogError::Io(io),
        None => CatalogError::InvalidPath(format!("filesystem loop at {:?}", root)),
    }
}
