//! Repository lifecycle and shared access discipline

use std::sync::{Mutex, MutexGuard, PoisonError};

use git2::Repository;
use sync_fs::NormalizedPath;

use crate::{Error, Result};

/// Owns the on-disk versioned store backing the connector.
///
/// Opening a repository is cheap with git2, so each operation opens it
/// fresh; the handle carries the validated paths plus the lock that
/// serializes index-mutating sequences (stage, commit, push, index
/// removal). Reads against committed trees never take that lock.
pub struct RepoHandle {
    root: NormalizedPath,
    git_dir: NormalizedPath,
    git_lock: Mutex<()>,
}

impl RepoHandle {
    /// Open the repository at `root`, initializing an empty one on first
    /// run.
    pub fn open_or_create(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        let git_dir = root.join(".git");

        if git_dir.exists() {
            // Validate that what is on disk actually opens
            Repository::open(root.to_native()).map_err(|e| Error::storage_init(&root, e))?;
        } else {
            Repository::init(root.to_native()).map_err(|e| Error::storage_init(&root, e))?;
            tracing::debug!(root = %root, "initialized empty settings repository");
        }

        Ok(Self {
            root,
            git_dir,
            git_lock: Mutex::new(()),
        })
    }

    /// Working-directory root holding the tracked configuration tree.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// The git metadata directory under the root.
    pub fn git_dir(&self) -> &NormalizedPath {
        &self.git_dir
    }

    /// Open a fresh `git2::Repository` for one operation.
    pub(crate) fn repo(&self) -> Result<Repository> {
        Repository::open(self.root.to_native()).map_err(|e| Error::storage(&self.root, e))
    }

    /// Serialize an index-mutating sequence against this repository.
    pub(crate) fn lock_git(&self) -> MutexGuard<'_, ()> {
        self.git_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current HEAD commit, or `None` before anything was committed.
    pub(crate) fn head_commit<'r>(&self, repo: &'r Repository) -> Result<Option<git2::Commit<'r>>> {
        match repo.head() {
            Ok(head) => head
                .peel_to_commit()
                .map(Some)
                .map_err(|e| Error::storage(&self.root, e)),
            Err(e) if head_is_unborn(&e) => Ok(None),
            Err(e) => Err(Error::storage(&self.root, e)),
        }
    }
}

fn head_is_unborn(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
    )
}
