//! Progress observation for volume scans.
//!
//! The engine only notifies; drawing a progress bar or status line is up to
//! whoever implements [`ProgressObserver`]. [`ScanProgress`] is a ready-made
//! observer that keeps lock-free counters a UI thread can poll.

use crate::tree::walker::ScanFault;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Receives notifications while a catalog is being built.
///
/// Called from the thread running the build, so implementations must be cheap
/// and thread-safe.
pub trait ProgressObserver: Send + Sync {
    fn on_started(&self, _root: &Path) {}
    fn on_directory(&self, _relative: &Path) {}
    fn on_file(&self, _relative: &Path) {}
    fn on_fault(&self, _fault: &ScanFault) {}
    fn on_finished(&self) {}
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {}

/// Counters for an in-flight or finished scan
#[derive(Debug, Default)]
pub struct ScanProgress {
    pub scanned_dirs: AtomicUsize,
    pub scanned_files: AtomicUsize,
    pub faults: AtomicUsize,
    pub started_at: AtomicU64,
    pub finished_at: AtomicU64,
}

impl ScanProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of the progress values.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            scanned_dirs: self.scanned_dirs.load(Ordering::Relaxed),
            scanned_files: self.scanned_files.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
            started_at: zero_to_none(self.started_at.load(Ordering::Relaxed)),
            finished_at: zero_to_none(self.finished_at.load(Ordering::Relaxed)),
        }
    }
}

impl ProgressObserver for ScanProgress {
    fn on_started(&self, _root: &Path) {
        self.scanned_dirs.store(0, Ordering::Relaxed);
        self.scanned_files.store(0, Ordering::Relaxed);
        self.faults.store(0, Ordering::Relaxed);
        self.started_at.store(now_millis(), Ordering::Relaxed);
        self.finished_at.store(0, Ordering::Relaxed);
    }

    fn on_directory(&self, _relative: &Path) {
        self.scanned_dirs.fetch_add(1, Ordering::Relaxed);
    }

    fn on_file(&self, _relative: &Path) {
        self.scanned_files.fetch_add(1, Ordering::Relaxed);
    }

    fn on_fault(&self, _fault: &ScanFault) {
        self.faults.fetch_add(1, Ordering::Relaxed);
    }

    fn on_finished(&self) {
        self.finished_at.store(now_millis(), Ordering::Relaxed);
    }
}

/// A snapshot of scan progress values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub scanned_dirs: usize,
    pub scanned_files: usize,
    pub faults: usize,
    pub started_at: Option<u64>,
    pub finished_at: Option<u64>,
}

impl ProgressSnapshot {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

fn zero_to_none(value: u64) -> Option<u64> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}
