//! Working-tree mutation with change tracking

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::{ChangeSet, Error, RepoHandle, Result};

/// Writes and deletes tracked configuration files, keeping the
/// tracked-change set in step with the working tree.
pub struct FileStore {
    handle: Arc<RepoHandle>,
    changes: Arc<ChangeSet>,
}

impl FileStore {
    pub fn new(handle: Arc<RepoHandle>, changes: Arc<ChangeSet>) -> Self {
        Self { handle, changes }
    }

    /// Write `content` fully to `path` under the repository root,
    /// creating parent directories and overwriting any existing file,
    /// then mark the path pending.
    ///
    /// The change set is updated only after the write completed, so a
    /// failed write leaves tracking untouched.
    pub fn write(&self, path: &str, content: impl Read) -> Result<()> {
        let target = self.handle.root().join(path);
        sync_fs::io::copy_stream(&target, content)?;

        self.changes.insert(path);
        tracing::debug!(path, "tracked working-tree write");
        Ok(())
    }

    /// Delete `path` from tracking, the working tree, and the index.
    ///
    /// The change set entry goes first so a concurrent publish can no
    /// longer stage the path. Deletion intent is authoritative: the set
    /// removal is not rolled back when a later step fails. The index
    /// removal is staged immediately; the next publish commits it.
    pub fn delete(&self, path: &str) -> Result<()> {
        self.changes.remove(path);

        let target = self.handle.root().join(path);
        match fs::remove_file(target.to_native()) {
            Ok(()) => {}
            // Never written, or already gone
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(sync_fs::Error::io(target.to_native(), e).into()),
        }

        let _guard = self.handle.lock_git();
        let repo = self.handle.repo()?;
        let root = self.handle.root();

        let mut index = repo.index().map_err(|e| Error::storage(root, e))?;
        match index.remove_path(Path::new(path)) {
            Ok(()) => {}
            // Never staged; nothing to record
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(()),
            Err(e) => return Err(Error::storage(root, e)),
        }
        index.write().map_err(|e| Error::storage(root, e))?;

        tracing::debug!(path, "removed path from working tree and index");
        Ok(())
    }

    /// List the names of the immediate entries under `path`.
    ///
    /// Empty vec for a missing or empty directory; this is a pure read.
    pub fn list_children(&self, path: &str) -> Vec<String> {
        sync_fs::io::list_children(&self.handle.root().join(path))
    }
}
