//! Fetch, stage, commit, and push orchestration

use std::path::Path;
use std::sync::Arc;

use git2::{ErrorCode, FetchOptions, FetchPrune, Repository};

use crate::{ChangeSet, Error, RepoHandle, Result};

/// Remote name used when the host does not configure one explicitly.
pub const DEFAULT_REMOTE: &str = "origin";

const FALLBACK_SIGNATURE_NAME: &str = "settings-sync";
const FALLBACK_SIGNATURE_EMAIL: &str = "settings-sync@localhost";

/// Orchestrates the sync cycle: refresh pulls remote history into
/// remote-tracking refs, publish drains pending paths into a commit and
/// transmits it.
///
/// An absent remote is an expected configuration for both operations,
/// never an error. Retry scheduling belongs to the host; a failed push
/// leaves local history committed, so the next publish is a natural
/// retry.
pub struct SyncEngine {
    handle: Arc<RepoHandle>,
    changes: Arc<ChangeSet>,
    remote: String,
}

impl SyncEngine {
    pub fn new(handle: Arc<RepoHandle>, changes: Arc<ChangeSet>) -> Self {
        Self::with_remote(handle, changes, DEFAULT_REMOTE)
    }

    pub fn with_remote(
        handle: Arc<RepoHandle>,
        changes: Arc<ChangeSet>,
        remote: impl Into<String>,
    ) -> Self {
        Self {
            handle,
            changes,
            remote: remote.into(),
        }
    }

    /// Fetch remote history into remote-tracking refs, pruning refs that
    /// were deleted on the remote. Never touches the working tree or
    /// local HEAD.
    pub fn refresh(&self) -> Result<()> {
        let _guard = self.handle.lock_git();
        let repo = self.handle.repo()?;

        let mut remote = match repo.find_remote(&self.remote) {
            Ok(remote) => remote,
            Err(e) if remote_not_configured(&e) => {
                tracing::debug!(remote = %self.remote, "no remote configured; skipping fetch");
                return Ok(());
            }
            Err(e) => return Err(Error::transport(e)),
        };

        let mut opts = FetchOptions::new();
        opts.prune(FetchPrune::On);

        // Empty refspec list fetches the remote's configured refspecs
        remote
            .fetch(&[] as &[&str], Some(&mut opts), None)
            .map_err(Error::transport)?;

        tracing::debug!(remote = %self.remote, "fetched remote history");
        Ok(())
    }

    /// Stage pending paths, commit when the staged tree differs from
    /// HEAD, and push when a remote is configured and behind.
    ///
    /// With nothing pending anywhere this is a complete no-op.
    pub fn publish(&self) -> Result<()> {
        let _guard = self.handle.lock_git();
        let repo = self.handle.repo()?;

        let pending = self.changes.drain();
        if !pending.is_empty() {
            self.stage(&repo, &pending)?;
        }

        self.commit_if_changed(&repo)?;
        self.push_if_behind(&repo)
    }

    /// Register exactly the drained paths into the index. A path that
    /// vanished between write and stage is dropped from the index
    /// instead.
    fn stage(&self, repo: &Repository, paths: &[String]) -> Result<()> {
        let root = self.handle.root();
        let mut index = repo.index().map_err(|e| Error::storage(root, e))?;

        for path in paths {
            let rel = Path::new(path);
            if root.join(path).is_file() {
                index.add_path(rel).map_err(|e| Error::storage(root, e))?;
            } else {
                match index.remove_path(rel) {
                    Ok(()) => {}
                    Err(e) if e.code() == ErrorCode::NotFound => {}
                    Err(e) => return Err(Error::storage(root, e)),
                }
            }
        }

        index.write().map_err(|e| Error::storage(root, e))?;
        tracing::debug!(count = paths.len(), "staged pending paths");
        Ok(())
    }

    /// Record a snapshot commit when the index tree differs from the
    /// HEAD tree. Deletions staged by `FileStore::delete` are picked up
    /// here even when the drained snapshot was empty.
    fn commit_if_changed(&self, repo: &Repository) -> Result<()> {
        let root = self.handle.root();
        let mut index = repo.index().map_err(|e| Error::storage(root, e))?;
        let tree_id = index.write_tree().map_err(|e| Error::storage(root, e))?;

        let head_commit = self.handle.head_commit(repo)?;
        let changed = match &head_commit {
            Some(commit) => commit.tree_id() != tree_id,
            None => index.len() > 0,
        };
        if !changed {
            return Ok(());
        }

        let tree = repo.find_tree(tree_id).map_err(|e| Error::storage(root, e))?;
        let signature = repo
            .signature()
            .or_else(|_| git2::Signature::now(FALLBACK_SIGNATURE_NAME, FALLBACK_SIGNATURE_EMAIL))
            .map_err(|e| Error::storage(root, e))?;

        let parents: Vec<&git2::Commit> = head_commit.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            "Update settings",
            &tree,
            &parents,
        )
        .map_err(|e| Error::storage(root, e))?;

        tracing::debug!(tree = %tree_id, "recorded settings snapshot");
        Ok(())
    }

    /// Push the current branch when the local tip differs from the
    /// remote-tracking tip. Skipped silently before the first commit or
    /// when no remote is configured.
    fn push_if_behind(&self, repo: &Repository) -> Result<()> {
        let root = self.handle.root();

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(());
            }
            Err(e) => return Err(Error::storage(root, e)),
        };
        let branch = head.shorthand().unwrap_or("HEAD").to_string();
        let local_tip = head.target();

        let mut remote = match repo.find_remote(&self.remote) {
            Ok(remote) => remote,
            Err(e) if remote_not_configured(&e) => {
                tracing::debug!(remote = %self.remote, "no remote configured; skipping push");
                return Ok(());
            }
            Err(e) => return Err(Error::transport(e)),
        };

        let tracking = format!("refs/remotes/{}/{}", self.remote, branch);
        if let Ok(reference) = repo.find_reference(&tracking)
            && reference.target() == local_tip
        {
            return Ok(());
        }

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[&refspec], None).map_err(Error::transport)?;

        tracing::debug!(remote = %self.remote, branch = %branch, "pushed local history");
        Ok(())
    }
}

/// find_remote failure for a name that simply is not configured, as
/// opposed to a transport-level problem.
fn remote_not_configured(e: &git2::Error) -> bool {
    e.code() == ErrorCode::NotFound || e.class() == git2::ErrorClass::Config
}
