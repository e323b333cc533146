//! Git-backed synchronization connector
//!
//! Persists a mutable tree of configuration files into a git repository:
//! tracks working-tree writes in a thread-safe change set, batches them
//! into staged commits, pushes to an optional remote, and reads
//! historical content back out of committed trees.

pub mod change_set;
pub mod connector;
pub mod error;
pub mod handle;
pub mod reader;
pub mod store;
pub mod sync;

pub use change_set::ChangeSet;
pub use connector::Connector;
pub use error::{Error, Result};
pub use handle::RepoHandle;
pub use reader::BlobReader;
pub use store::FileStore;
pub use sync::SyncEngine;
