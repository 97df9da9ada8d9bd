//! Directory lifecycle for offline map storage.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use super::error::{OfflineMapError, OfflineMapResult};
use super::paths::{item_directory, validate_item_id};

/// Computes and manages the per-item offline map directories.
///
/// All operations are synchronous and may block on filesystem I/O. None
/// are atomic across process crashes; a crash between the create and
/// remove steps of [`OfflineMapStore::prepare_temporary_directory`] can
/// leave a stray leaf directory behind, which the next prepare removes.
///
/// Deletion is the caller's responsibility: nothing here cleans up
/// automatically when an offline map is discarded.
#[derive(Debug, Clone)]
pub struct OfflineMapStore {
    temp_root: PathBuf,
    documents_root: PathBuf,
}

impl Default for OfflineMapStore {
    fn default() -> Self {
        Self {
            temp_root: std::env::temp_dir(),
            documents_root: dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl OfflineMapStore {
    /// Create a store rooted at the platform temporary and documents
    /// directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the temporary root (tests, sandboxed hosts).
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = root.into();
        self
    }

    /// Override the documents root (tests, sandboxed hosts).
    pub fn with_documents_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.documents_root = root.into();
        self
    }

    /// Path where the offline map for `item_id` is staged during
    /// download.
    pub fn temporary_directory(&self, item_id: &str) -> OfflineMapResult<PathBuf> {
        validate_item_id(item_id)?;
        Ok(item_directory(&self.temp_root, item_id))
    }

    /// Path where the downloaded offline map for `item_id` is persisted.
    pub fn persisted_directory(&self, item_id: &str) -> OfflineMapResult<PathBuf> {
        validate_item_id(item_id)?;
        Ok(item_directory(&self.documents_root, item_id))
    }

    /// Ensure the staging ancestors exist and the staging leaf does not.
    ///
    /// Create-with-intermediates followed by recursive removal of the
    /// leaf: the download engine insists on creating the leaf directory
    /// itself, and a crashed download's leftover staging content must not
    /// survive into the next attempt. Idempotent; safe to call before
    /// every download.
    pub fn prepare_temporary_directory(&self, item_id: &str) -> OfflineMapResult<()> {
        let path = self.temporary_directory(item_id)?;
        fs::create_dir_all(&path).map_err(|source| OfflineMapError::CreateDir {
            path: path.clone(),
            source,
        })?;
        fs::remove_dir_all(&path).map_err(|source| OfflineMapError::Remove {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "prepared temporary offline map directory");
        Ok(())
    }

    /// Ensure the persisted directory for `item_id` exists.
    pub fn prepare_persisted_directory(&self, item_id: &str) -> OfflineMapResult<()> {
        let path = self.persisted_directory(item_id)?;
        fs::create_dir_all(&path).map_err(|source| OfflineMapError::CreateDir {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "prepared persisted offline map directory");
        Ok(())
    }

    /// Recursively remove the persisted offline map for `item_id`.
    ///
    /// Removing a path that does not exist is an error; callers that
    /// delete twice learn about it rather than silently succeeding.
    pub fn delete_persisted_directory(&self, item_id: &str) -> OfflineMapResult<()> {
        let path = self.persisted_directory(item_id)?;
        fs::remove_dir_all(&path).map_err(|source| OfflineMapError::Remove {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "deleted persisted offline map");
        Ok(())
    }
}
