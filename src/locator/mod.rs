//! Reverse geocoding, contingent on app work mode and reachability.
//!
//! The [`AddressLocator`] selector picks between two geocoding backends at
//! call time: an online world geocoding service when the app works online
//! and the device is reachable, otherwise a side-loaded offline locator.
//! Both backends implement the [`Geocoder`] trait, so tests can substitute
//! mocks for either side.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use data_collection::context::AppContext;
//! use data_collection::geo::MapPoint;
//! use data_collection::locator::{
//!     AddressLocator, AsyncReqwestClient, OfflineLocator, OnlineLocator,
//! };
//!
//! let context = Arc::new(AppContext::default());
//! let locator = AddressLocator::new(
//!     Arc::clone(&context),
//!     || OnlineLocator::new(AsyncReqwestClient::new().unwrap()),
//!     || OfflineLocator::new("/data/AddressLocator.json"),
//! );
//!
//! let address = locator.reverse_geocode(MapPoint::new(-117.195, 34.057)).await?;
//! locator.close();
//! ```

mod http;
mod offline;
mod online;
mod selector;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use offline::{LocatorRecord, OfflineLocator, OFFLINE_LOCATOR_NAME};
pub use online::OnlineLocator;
pub use selector::{select_backend, AddressLocator};
pub use types::{
    BackendKind, Credential, GeocodeMatch, Geocoder, LocatorError, LocatorResult,
    ReverseGeocodeParameters, ADDRESS_KEY, MATCH_ADDRESS_KEY,
};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
