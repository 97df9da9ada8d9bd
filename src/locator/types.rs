//! Core types for the geocoding backends.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::geo::MapPoint;

/// Attribute key carrying the address on online geocode results.
pub const ADDRESS_KEY: &str = "Address";

/// Attribute key carrying the address on offline geocode results.
pub const MATCH_ADDRESS_KEY: &str = "Match_addr";

/// Result type for locator operations.
pub type LocatorResult<T> = Result<T, LocatorError>;

/// Errors that can occur during backend selection and reverse geocoding.
#[derive(Debug, Clone, Error)]
pub enum LocatorError {
    /// The selected backend failed to load.
    #[error("Locator failed to load: {0}")]
    LoadFailed(String),

    /// Work mode or reachability changed while the backend was loading,
    /// and the backend that would now be selected differs from the one
    /// that loaded.
    #[error("Work mode or reachability changed while the locator was loading")]
    ContextChanged,

    /// An HTTP request to the geocoding service failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The reverse geocode request failed.
    #[error("Reverse geocode failed: {0}")]
    Geocode(String),

    /// The geocode result carried neither the online nor the offline
    /// address attribute. Backends are expected to always supply one of
    /// the two keys.
    #[error("Geocode result is missing both the 'Address' and 'Match_addr' attributes")]
    MissingAddressAttribute,

    /// The selector has been closed.
    #[error("Address locator has been closed")]
    Closed,
}

/// Which geocoding backend the selection rule picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The world geocoding service.
    Online,
    /// The side-loaded offline locator.
    Offline,
}

/// An authentication credential held by a backend.
///
/// Backends retain their credential only for the lifetime of the selector
/// that owns them; [`crate::locator::AddressLocator::clear_credentials`]
/// strips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Create a credential from an access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw access token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Parameters for a reverse geocode request.
#[derive(Debug, Clone, Default)]
pub struct ReverseGeocodeParameters {
    /// Whether the caller intends to persist the result.
    ///
    /// Results of selector-driven lookups are written to a data table
    /// downstream, so the selector always sets this. Stored lookups are a
    /// credits-consuming operation on the online service; this library
    /// flags the implication but does not meter it.
    pub for_storage: bool,
}

impl ReverseGeocodeParameters {
    /// Parameters for a lookup whose result will be persisted.
    pub fn for_storage() -> Self {
        Self { for_storage: true }
    }
}

/// A single reverse geocode result.
///
/// The attribute set is backend-specific; the online service keys the
/// address under [`ADDRESS_KEY`], the offline locator under
/// [`MATCH_ADDRESS_KEY`].
#[derive(Debug, Clone, Default)]
pub struct GeocodeMatch {
    /// Backend-supplied attributes for the matched location.
    pub attributes: HashMap<String, Value>,
}

impl GeocodeMatch {
    /// Extract the address string, trying the online key first and the
    /// offline key as fallback.
    pub fn address(&self) -> Option<&str> {
        self.attributes
            .get(ADDRESS_KEY)
            .and_then(Value::as_str)
            .or_else(|| self.attributes.get(MATCH_ADDRESS_KEY).and_then(Value::as_str))
    }
}

/// A geocoding backend capability.
///
/// Implementations must be safe to share across calls on one selector;
/// `load` must be idempotent, since the selector loads the selected
/// backend on every request.
pub trait Geocoder: Send + Sync {
    /// Load or initialize the backend. Idempotent.
    async fn load(&self) -> LocatorResult<()>;

    /// Reverse geocode a point into a match with address attributes.
    async fn reverse_geocode(
        &self,
        point: MapPoint,
        params: &ReverseGeocodeParameters,
    ) -> LocatorResult<GeocodeMatch>;

    /// Replace the backend's credential. `None` clears it, requiring
    /// re-authentication before the next authenticated request.
    fn set_credential(&self, credential: Option<Credential>);

    /// The backend's current credential, if any.
    fn credential(&self) -> Option<Credential>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_prefers_online_key() {
        let mut attributes = HashMap::new();
        attributes.insert(ADDRESS_KEY.to_string(), json!("100 Main St"));
        attributes.insert(MATCH_ADDRESS_KEY.to_string(), json!("200 Oak Ave"));
        let matched = GeocodeMatch { attributes };

        assert_eq!(matched.address(), Some("100 Main St"));
    }

    #[test]
    fn test_address_falls_back_to_match_addr() {
        let mut attributes = HashMap::new();
        attributes.insert(MATCH_ADDRESS_KEY.to_string(), json!("200 Oak Ave"));
        let matched = GeocodeMatch { attributes };

        assert_eq!(matched.address(), Some("200 Oak Ave"));
    }

    #[test]
    fn test_address_missing_when_neither_key_present() {
        let mut attributes = HashMap::new();
        attributes.insert("City".to_string(), json!("Redlands"));
        let matched = GeocodeMatch { attributes };

        assert_eq!(matched.address(), None);
    }

    #[test]
    fn test_address_ignores_non_string_values() {
        let mut attributes = HashMap::new();
        attributes.insert(ADDRESS_KEY.to_string(), json!(42));
        let matched = GeocodeMatch { attributes };

        assert_eq!(matched.address(), None);
    }

    #[test]
    fn test_credential_token_round_trip() {
        let credential = Credential::new("abc123");
        assert_eq!(credential.token(), "abc123");
    }

    #[test]
    fn test_for_storage_parameters() {
        assert!(ReverseGeocodeParameters::for_storage().for_storage);
        assert!(!ReverseGeocodeParameters::default().for_storage);
    }
}
