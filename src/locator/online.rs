//! Online geocoding backend over the world geocoding service.
//!
//! # URL Pattern
//!
//! `<base>/reverseGeocode?f=json&forStorage={bool}&location={x},{y}[&token=…]`
//!
//! The service answers `200 OK` even for failed lookups; errors arrive as
//! a JSON `error` object in the body, so the body is always parsed.
//!
//! # Billing
//!
//! Requests with `forStorage=true` are a credits-consuming operation. See:
//! <https://developers.arcgis.com/rest/geocode/api-reference/geocoding-free-vs-paid.htm>

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::http::AsyncHttpClient;
use super::types::{
    Credential, GeocodeMatch, Geocoder, LocatorError, LocatorResult, ReverseGeocodeParameters,
};
use crate::geo::MapPoint;

/// Base URL of the world geocoding service.
const GEOCODE_SERVICE_URL: &str =
    "https://geocode-api.arcgis.com/arcgis/rest/services/World/GeocodeServer";

/// Error object the geocoding service embeds in `200 OK` bodies.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    code: i64,
    message: String,
}

/// Body of a `reverseGeocode` response.
#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    address: Option<HashMap<String, Value>>,
    #[serde(default)]
    error: Option<ServiceErrorBody>,
}

/// Online geocoding backend.
///
/// Generic over the HTTP client so tests can substitute canned responses.
/// `load` fetches the service metadata once; subsequent loads are no-ops.
pub struct OnlineLocator<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    loaded: AtomicBool,
    credential: Mutex<Option<Credential>>,
}

impl<C: AsyncHttpClient> OnlineLocator<C> {
    /// Creates a backend against the world geocoding service.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, GEOCODE_SERVICE_URL)
    }

    /// Creates a backend against a custom service root.
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            loaded: AtomicBool::new(false),
            credential: Mutex::new(None),
        }
    }

    /// Builds the reverse geocode URL for the given point and parameters.
    fn build_reverse_geocode_url(&self, point: MapPoint, params: &ReverseGeocodeParameters) -> String {
        let mut url = format!(
            "{}/reverseGeocode?f=json&forStorage={}&location={},{}",
            self.base_url, params.for_storage, point.x, point.y
        );
        if let Some(credential) = self.credential.lock().as_ref() {
            url.push_str("&token=");
            url.push_str(credential.token());
        }
        url
    }
}

impl<C: AsyncHttpClient> Geocoder for OnlineLocator<C> {
    async fn load(&self) -> LocatorResult<()> {
        if self.loaded.load(Ordering::SeqCst) {
            return Ok(());
        }

        let url = format!("{}?f=json", self.base_url);
        let body = self
            .http_client
            .get(&url)
            .await
            .map_err(|e| LocatorError::LoadFailed(e.to_string()))?;

        let metadata: Value = serde_json::from_slice(&body)
            .map_err(|e| LocatorError::LoadFailed(format!("Invalid service metadata: {}", e)))?;
        if let Some(error) = metadata.get("error") {
            return Err(LocatorError::LoadFailed(format!(
                "Service reported an error: {}",
                error
            )));
        }

        self.loaded.store(true, Ordering::SeqCst);
        debug!(base_url = %self.base_url, "online locator loaded");
        Ok(())
    }

    async fn reverse_geocode(
        &self,
        point: MapPoint,
        params: &ReverseGeocodeParameters,
    ) -> LocatorResult<GeocodeMatch> {
        let url = self.build_reverse_geocode_url(point, params);
        let body = self
            .http_client
            .get(&url)
            .await
            .map_err(|e| LocatorError::Geocode(e.to_string()))?;

        let response: ReverseGeocodeResponse = serde_json::from_slice(&body)
            .map_err(|e| LocatorError::Geocode(format!("Invalid response: {}", e)))?;

        if let Some(error) = response.error {
            return Err(LocatorError::Geocode(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }

        Ok(GeocodeMatch {
            attributes: response.address.unwrap_or_default(),
        })
    }

    fn set_credential(&self, credential: Option<Credential>) {
        *self.credential.lock() = credential;
    }

    fn credential(&self) -> Option<Credential> {
        self.credential.lock().clone()
    }
}
