//! Directories for per-item offline map storage.
//!
//! Each offline map is keyed by the portal item ID of the web map it was
//! generated from and lives under a fixed two-level namespace,
//! `data_collection/offlineMap/<item-id>`, rooted either at the platform
//! temporary-files area (staging during download) or the user documents
//! area (the persisted copy). The download engine itself creates the
//! staging leaf directory, which is why
//! [`OfflineMapStore::prepare_temporary_directory`] leaves the leaf
//! absent.

mod error;
mod paths;
mod store;

pub use error::{OfflineMapError, OfflineMapResult};
pub use paths::{APP_DIRECTORY, OFFLINE_MAP_DIRECTORY};
pub use store::OfflineMapStore;
