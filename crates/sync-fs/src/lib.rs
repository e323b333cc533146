//! Filesystem layer for the settings-sync connector
//!
//! Provides forward-slash-normalized path handling and safe local I/O for
//! the working tree that mirrors tracked configuration files.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
