//! Error types for offline map storage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for offline map storage operations.
pub type OfflineMapResult<T> = Result<T, OfflineMapError>;

/// Errors that can occur while managing offline map directories.
#[derive(Debug, Error)]
pub enum OfflineMapError {
    /// The item ID would escape the offline map namespace.
    #[error("Invalid offline map item ID: {0:?}")]
    InvalidItemId(String),

    /// Failed to create a directory.
    #[error("Failed to create directory {}: {}", .path.display(), .source)]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to remove a directory. Removal of a path that does not
    /// exist is an error, not a no-op.
    #[error("Failed to remove {}: {}", .path.display(), .source)]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
