//! Path construction for the offline map namespace.

use std::path::{Path, PathBuf};

use super::error::{OfflineMapError, OfflineMapResult};

/// App-specific top-level directory name.
pub const APP_DIRECTORY: &str = "data_collection";

/// Directory name holding per-item offline maps.
pub const OFFLINE_MAP_DIRECTORY: &str = "offlineMap";

/// Reject item IDs that would escape the offline map namespace.
///
/// Portal item IDs are opaque alphanumeric strings; anything resembling a
/// path component separator, the current/parent directory, or an empty
/// segment is refused before a path is ever built.
pub(crate) fn validate_item_id(item_id: &str) -> OfflineMapResult<()> {
    if item_id.is_empty()
        || item_id == "."
        || item_id == ".."
        || item_id.contains(['/', '\\', '\0'])
    {
        return Err(OfflineMapError::InvalidItemId(item_id.to_string()));
    }
    Ok(())
}

/// `<root>/data_collection/offlineMap/<item-id>`.
pub(crate) fn item_directory(root: &Path, item_id: &str) -> PathBuf {
    root.join(APP_DIRECTORY)
        .join(OFFLINE_MAP_DIRECTORY)
        .join(item_id)
}
