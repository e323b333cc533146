//! Point-in-time reads against committed history

use std::path::Path;
use std::sync::Arc;

use crate::{Error, RepoHandle, Result};

/// Resolves tracked paths against the tree of the current HEAD commit.
///
/// Reads are decoupled from the live working directory: an in-flight
/// write never shows up here until it was published. Reads take no lock
/// and may run concurrently with writes, since committed trees are
/// immutable.
pub struct BlobReader {
    handle: Arc<RepoHandle>,
}

impl BlobReader {
    pub fn new(handle: Arc<RepoHandle>) -> Self {
        Self { handle }
    }

    /// Content of `path` in the last recorded snapshot.
    ///
    /// `Ok(None)` when nothing has been committed yet or the path does
    /// not exist in the HEAD tree; errors are reserved for genuine
    /// storage failures.
    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let repo = self.handle.repo()?;
        let root = self.handle.root();

        let Some(commit) = self.handle.head_commit(&repo)? else {
            return Ok(None);
        };
        let tree = commit.tree().map_err(|e| Error::storage(root, e))?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(Error::storage(root, e)),
        };

        let object = entry
            .to_object(&repo)
            .map_err(|e| Error::storage(root, e))?;
        match object.into_blob() {
            Ok(blob) => Ok(Some(blob.content().to_vec())),
            // The path names a subdirectory, not a file
            Err(_) => Ok(None),
        }
    }
}
