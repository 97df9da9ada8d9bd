//! Offline geocoding backend over a side-loaded locator dataset.
//!
//! The dataset is a JSON array of address records shipped with the app
//! (or downloaded alongside the offline map). `load` reads and caches it;
//! lookups are a nearest-neighbor scan within a search tolerance. Results
//! carry the address under the `Match_addr` attribute key, matching what
//! the mapping SDK's packaged locators produce.

use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::types::{
    Credential, GeocodeMatch, Geocoder, LocatorError, LocatorResult, ReverseGeocodeParameters,
    MATCH_ADDRESS_KEY,
};
use crate::geo::MapPoint;

/// Name of the side-loaded locator dataset.
pub const OFFLINE_LOCATOR_NAME: &str = "AddressLocator";

/// Default search tolerance, in dataset coordinate units.
///
/// Roughly one kilometer for geographic (degree) coordinates at mid
/// latitudes, which mirrors the packaged locator's default behavior of
/// snapping to the nearest street address.
const DEFAULT_SEARCH_TOLERANCE: f64 = 0.01;

/// A single record in the locator dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorRecord {
    /// X coordinate of the address point.
    pub x: f64,

    /// Y coordinate of the address point.
    pub y: f64,

    /// Human-readable address.
    pub address: String,
}

/// Offline geocoding backend.
pub struct OfflineLocator {
    dataset_path: PathBuf,
    search_tolerance: f64,
    records: RwLock<Option<Vec<LocatorRecord>>>,
    credential: Mutex<Option<Credential>>,
}

impl OfflineLocator {
    /// Creates a backend over the dataset at the given path.
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            search_tolerance: DEFAULT_SEARCH_TOLERANCE,
            records: RwLock::new(None),
            credential: Mutex::new(None),
        }
    }

    /// Set the search tolerance, in dataset coordinate units.
    pub fn with_search_tolerance(mut self, tolerance: f64) -> Self {
        self.search_tolerance = tolerance;
        self
    }

    /// Path to the side-loaded dataset.
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }
}

impl Geocoder for OfflineLocator {
    async fn load(&self) -> LocatorResult<()> {
        if self.records.read().is_some() {
            return Ok(());
        }

        let bytes = tokio::fs::read(&self.dataset_path).await.map_err(|e| {
            LocatorError::LoadFailed(format!(
                "Failed to read locator dataset {}: {}",
                self.dataset_path.display(),
                e
            ))
        })?;

        let records: Vec<LocatorRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            LocatorError::LoadFailed(format!(
                "Invalid locator dataset {}: {}",
                self.dataset_path.display(),
                e
            ))
        })?;

        debug!(
            dataset = %self.dataset_path.display(),
            records = records.len(),
            "offline locator loaded"
        );
        *self.records.write() = Some(records);
        Ok(())
    }

    async fn reverse_geocode(
        &self,
        point: MapPoint,
        _params: &ReverseGeocodeParameters,
    ) -> LocatorResult<GeocodeMatch> {
        let records = self.records.read();
        let records = records.as_ref().ok_or_else(|| {
            LocatorError::LoadFailed("Offline locator dataset is not loaded".to_string())
        })?;

        let mut best: Option<(&LocatorRecord, f64)> = None;
        for record in records.iter() {
            let dx = record.x - point.x;
            let dy = record.y - point.y;
            let distance_sq = dx * dx + dy * dy;
            if best.map_or(true, |(_, d)| distance_sq < d) {
                best = Some((record, distance_sq));
            }
        }

        let tolerance_sq = self.search_tolerance * self.search_tolerance;
        match best {
            Some((record, distance_sq)) if distance_sq <= tolerance_sq => {
                let mut matched = GeocodeMatch::default();
                matched.attributes.insert(
                    MATCH_ADDRESS_KEY.to_string(),
                    Value::String(record.address.clone()),
                );
                Ok(matched)
            }
            _ => Err(LocatorError::Geocode(format!(
                "No address within search tolerance of ({}, {})",
                point.x, point.y
            ))),
        }
    }

    fn set_credential(&self, credential: Option<Credential>) {
        *self.credential.lock() = credential;
    }

    fn credential(&self) -> Option<Credential> {
        self.credential.lock().clone()
    }
}
