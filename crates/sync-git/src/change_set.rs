//! Tracked-change accounting between sync cycles

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe set of relative paths awaiting the next staging pass.
///
/// Keeping this accounting in memory avoids a recursive working-tree scan
/// when staging. Paths are forward-slash normalized strings relative to
/// the repository root; membership is a set, so repeated writes to one
/// path stage it once.
#[derive(Debug, Default)]
pub struct ChangeSet {
    paths: Mutex<HashSet<String>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path as modified since the last staging pass.
    pub fn insert(&self, path: impl Into<String>) {
        self.guard().insert(path.into());
    }

    /// Withdraw a path, typically because it was deleted.
    ///
    /// Returns whether the path was pending.
    pub fn remove(&self, path: &str) -> bool {
        self.guard().remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.guard().contains(path)
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Atomically snapshot and clear the pending paths.
    ///
    /// Snapshot and clear happen under one lock acquisition, so no path
    /// can be drained twice and no concurrent insert is lost.
    pub fn drain(&self) -> Vec<String> {
        self.guard().drain().collect()
    }

    fn guard(&self) -> MutexGuard<'_, HashSet<String>> {
        // A poisoned lock only means a writer panicked mid-call; the set
        // itself is still a valid HashSet.
        self.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
