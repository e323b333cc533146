//! Atomic I/O operations

use std::fs;
use std::io::Read;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file.
///
/// Thin wrapper over [`copy_stream`] so byte-slice and streaming writes
/// share one code path.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    copy_stream(path, content).map(|_| ())
}

/// Stream a reader fully into a file, atomically.
///
/// Writes through a uniquely named temp file in the target directory and
/// renames it into place. Every call gets its own temp file, so writers
/// racing on one path never share a buffer; each rename publishes one
/// writer's complete bytes and the last rename wins. Parent directories
/// are created as needed. Returns the number of bytes written.
pub fn copy_stream(path: &NormalizedPath, mut content: impl Read) -> Result<u64> {
    let native_path = path.to_native();
    let parent = ensure_parent(&native_path)?;

    // Same directory as the target keeps the final rename on one filesystem
    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| Error::io(&native_path, e))?;

    let written = std::io::copy(&mut content, temp_file.as_file_mut())
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file
        .persist(&native_path)
        .map_err(|e| Error::io(&native_path, e.error))?;

    Ok(written)
}

/// List the names of the immediate entries under a directory.
///
/// Returns an empty vec when the directory does not exist or is empty.
/// A missing directory is an expected state, never an error.
pub fn list_children(path: &NormalizedPath) -> Vec<String> {
    let entries = match fs::read_dir(path.to_native()) {
        Ok(entries) => entries,
        Err(_) => {
            tracing::debug!(path = %path, "listing children of a missing directory");
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

fn ensure_parent(native_path: &Path) -> Result<&Path> {
    let parent = match native_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    Ok(parent)
}
