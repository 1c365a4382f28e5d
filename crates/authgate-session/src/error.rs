//! Error types for the session layer.

use std::path::PathBuf;

/// Errors that can occur while opening a session backend.
///
/// Only construction can fail. Once a store exists, `set` and `clear`
/// are infallible from the caller's point of view.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backing file exists but could not be read.
    #[error("failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file's parent directory could not be created.
    #[error("failed to prepare session directory {path}: {source}")]
    Prepare {
        path: PathBuf,
        source: std::io::Error,
    },
}
