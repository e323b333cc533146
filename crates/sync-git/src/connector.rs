//! Host-facing facade over the connector components

use std::io::Read;
use std::sync::Arc;

use sync_fs::NormalizedPath;

use crate::{BlobReader, ChangeSet, FileStore, RepoHandle, Result, SyncEngine};
use crate::sync::DEFAULT_REMOTE;

/// The complete host contract over one settings repository: working-tree
/// writes, committed-history reads, and remote synchronization.
///
/// All operations are blocking and safe to call from multiple host
/// threads; see the component types for the locking discipline.
pub struct Connector {
    store: FileStore,
    reader: BlobReader,
    engine: SyncEngine,
}

impl Connector {
    /// Open or initialize the repository at `root` and wire the
    /// components around it, syncing against the default remote.
    pub fn open(root: impl Into<NormalizedPath>) -> Result<Self> {
        Self::with_remote(root, DEFAULT_REMOTE)
    }

    /// Like [`Connector::open`] with an explicit remote name.
    pub fn with_remote(root: impl Into<NormalizedPath>, remote: impl Into<String>) -> Result<Self> {
        let handle = Arc::new(RepoHandle::open_or_create(root)?);
        let changes = Arc::new(ChangeSet::new());

        Ok(Self {
            store: FileStore::new(Arc::clone(&handle), Arc::clone(&changes)),
            reader: BlobReader::new(Arc::clone(&handle)),
            engine: SyncEngine::with_remote(handle, changes, remote),
        })
    }

    /// Write `content` to `path` and mark it pending for the next
    /// publish.
    pub fn write(&self, path: &str, content: impl Read) -> Result<()> {
        self.store.write(path, content)
    }

    /// Remove `path` from tracking, the working tree, and the index.
    pub fn delete(&self, path: &str) -> Result<()> {
        self.store.delete(path)
    }

    /// Names of the immediate entries under `path`; empty when missing.
    pub fn list_children(&self, path: &str) -> Vec<String> {
        self.store.list_children(path)
    }

    /// Content of `path` in the last published snapshot, if any.
    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        self.reader.read(path)
    }

    /// Pull remote history without touching local state.
    pub fn refresh(&self) -> Result<()> {
        self.engine.refresh()
    }

    /// Stage pending changes, commit, and push to the remote.
    pub fn publish(&self) -> Result<()> {
        self.engine.publish()
    }
}
