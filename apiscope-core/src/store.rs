//! Snapshot storage abstractions and the per-day loader.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{CoverageRecord, DailySnapshot, UsageRecord};
use crate::error::Result;

/// Abstraction over snapshot storage for testability.
///
/// Each calendar day addresses two resources: a coverage document (a JSON
/// object keyed by API name) and a usage document (a JSON array). An absent
/// resource is `Ok(None)`, never an error.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore {
    /// Read the raw coverage document for a day, if present.
    fn read_coverage(&self, day: &str) -> Result<Option<String>>;
    /// Read the raw usage document for a day, if present.
    fn read_usage(&self, day: &str) -> Result<Option<String>>;
}

/// Filesystem-backed snapshot store.
///
/// Reads `coverage-<day>.json` and `usage-<day>.json` under a data
/// directory supplied at construction. The directory is written by the
/// upstream collector; this store only reads.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store rooted at the given data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_optional(&self, file_name: String) -> Result<Option<String>> {
        match std::fs::read_to_string(self.root.join(file_name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn read_coverage(&self, day: &str) -> Result<Option<String>> {
        self.read_optional(format!("coverage-{day}.json"))
    }

    fn read_usage(&self, day: &str) -> Result<Option<String>> {
        self.read_optional(format!("usage-{day}.json"))
    }
}

/// Loads both halves of a day's snapshot, absorbing per-day failures.
pub struct SnapshotLoader<S: SnapshotStore> {
    store: S,
}

impl<S: SnapshotStore> SnapshotLoader<S> {
    /// Create a loader over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the snapshot for one day.
    ///
    /// Never fails: an absent resource yields the empty half, and a read or
    /// deserialize failure is logged as a warning and likewise yields the
    /// empty half, so one bad day cannot abort a range query.
    pub fn load(&self, day: &str) -> DailySnapshot {
        DailySnapshot {
            coverage: self.load_coverage(day),
            usage: self.load_usage(day),
        }
    }

    fn load_coverage(&self, day: &str) -> BTreeMap<String, CoverageRecord> {
        let raw = match self.store.read_coverage(day) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeMap::new(),
            Err(err) => {
                log::warn!("coverage snapshot for {day} unreadable: {err}");
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(coverage) => coverage,
            Err(err) => {
                log::warn!("coverage snapshot for {day} malformed: {err}");
                BTreeMap::new()
            }
        }
    }

    fn load_usage(&self, day: &str) -> Vec<UsageRecord> {
        let raw = match self.store.read_usage(day) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("usage snapshot for {day} unreadable: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(usage) => usage,
            Err(err) => {
                log::warn!("usage snapshot for {day} malformed: {err}");
                Vec::new()
            }
        }
    }
}
