//! Error types for sync-git
//!
//! git2 failures are mapped to one of three kinds at each call site:
//! storage initialization (fatal at construction), local storage failure
//! (per-operation), and sync transport failure (per refresh/publish).
//! There is deliberately no blanket `From<git2::Error>`.

use std::path::PathBuf;

use sync_fs::NormalizedPath;

/// Result type for sync-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repository location is unusable (unwritable or corrupted).
    #[error("Cannot initialize repository storage at {path}: {message}")]
    StorageInit { path: PathBuf, message: String },

    #[error("Filesystem error: {0}")]
    Fs(#[from] sync_fs::Error),

    /// Local object store or index failure during a specific operation.
    #[error("Storage error at {path}: {message}")]
    Storage { path: PathBuf, message: String },

    /// Remote transport failure during refresh or publish. An absent
    /// remote is never this error.
    #[error("Sync transport error: {message}")]
    Transport { message: String },
}

impl Error {
    pub(crate) fn storage_init(path: &NormalizedPath, source: git2::Error) -> Self {
        Self::StorageInit {
            path: path.to_native(),
            message: source.message().to_string(),
        }
    }

    pub(crate) fn storage(path: &NormalizedPath, source: git2::Error) -> Self {
        Self::Storage {
            path: path.to_native(),
            message: source.message().to_string(),
        }
    }

    pub(crate) fn transport(source: git2::Error) -> Self {
        Self::Transport {
            message: source.message().to_string(),
        }
    }
}
