//! Context-aware selection between the online and offline backends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::types::{
    BackendKind, Geocoder, LocatorError, LocatorResult, ReverseGeocodeParameters,
};
use crate::context::{LocatorContext, WorkMode};
use crate::geo::MapPoint;

/// The backend selection rule.
///
/// Online iff the work mode is online and the device is reachable;
/// otherwise offline. Pure: evaluated at call start and re-evaluated
/// after the load suspension point.
pub fn select_backend(work_mode: WorkMode, reachable: bool) -> BackendKind {
    if work_mode == WorkMode::Online && reachable {
        BackendKind::Online
    } else {
        BackendKind::Offline
    }
}

/// Reverse geocoding facade, contingent on app work mode and reachability.
///
/// Owns at most one instance of each backend kind, constructed on first
/// use and reused for the selector's lifetime. Overlapping calls on one
/// selector are serialized by an in-flight guard, so a request always
/// observes a settled backend.
///
/// Call [`AddressLocator::close`] when the selector is retired; it strips
/// credentials from both backends so authentication material does not
/// outlive the selector. Dropping the selector clears credentials as
/// well, but `close` makes the teardown point explicit.
pub struct AddressLocator<On, Off, Ctx>
where
    On: Geocoder,
    Off: Geocoder,
    Ctx: LocatorContext,
{
    context: Ctx,
    make_online: Box<dyn Fn() -> On + Send + Sync>,
    make_offline: Box<dyn Fn() -> Off + Send + Sync>,
    online: Mutex<Option<Arc<On>>>,
    offline: Mutex<Option<Arc<Off>>>,
    in_flight: tokio::sync::Mutex<()>,
    closed: AtomicBool,
}

impl<On, Off, Ctx> AddressLocator<On, Off, Ctx>
where
    On: Geocoder,
    Off: Geocoder,
    Ctx: LocatorContext,
{
    /// Create a selector over the given context and backend factories.
    ///
    /// Each factory runs at most once per selector lifetime (until
    /// [`AddressLocator::reset_backends`] discards the instances).
    pub fn new(
        context: Ctx,
        make_online: impl Fn() -> On + Send + Sync + 'static,
        make_offline: impl Fn() -> Off + Send + Sync + 'static,
    ) -> Self {
        Self {
            context,
            make_online: Box::new(make_online),
            make_offline: Box::new(make_offline),
            online: Mutex::new(None),
            offline: Mutex::new(None),
            in_flight: tokio::sync::Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    /// Reverse geocode an address from a map point.
    ///
    /// Selects a backend from the current context, loads it, re-checks
    /// the selection (the context may have changed during the load), then
    /// issues the lookup with the persist-result flag set. The address is
    /// read from the `Address` attribute, falling back to `Match_addr`.
    pub async fn reverse_geocode(&self, point: MapPoint) -> LocatorResult<String> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(LocatorError::Closed);
        }
        let _guard = self.in_flight.lock().await;

        let kind = self.selected_kind();
        debug!(?kind, x = point.x, y = point.y, "reverse geocoding");

        let matched = match kind {
            BackendKind::Online => {
                let backend = self.online_backend();
                self.geocode_with(backend.as_ref(), kind, point).await?
            }
            BackendKind::Offline => {
                let backend = self.offline_backend();
                self.geocode_with(backend.as_ref(), kind, point).await?
            }
        };

        let address = matched
            .address()
            .ok_or(LocatorError::MissingAddressAttribute)?;
        Ok(address.to_string())
    }

    /// Strip the stored credential from every backend constructed so far.
    ///
    /// A backend that was never constructed holds no credential, so it is
    /// left untouched.
    pub fn clear_credentials(&self) {
        if let Some(online) = self.online.lock().as_ref() {
            online.set_credential(None);
        }
        if let Some(offline) = self.offline.lock().as_ref() {
            offline.set_credential(None);
        }
    }

    /// Discard both backend instances; the next request reconstructs the
    /// one it selects.
    pub fn reset_backends(&self) {
        self.clear_credentials();
        *self.online.lock() = None;
        *self.offline.lock() = None;
    }

    /// Tear the selector down: clear credentials and refuse further
    /// requests with [`LocatorError::Closed`]. Idempotent.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.clear_credentials();
        debug!("address locator closed");
    }

    fn selected_kind(&self) -> BackendKind {
        select_backend(self.context.work_mode(), self.context.is_reachable())
    }

    fn online_backend(&self) -> Arc<On> {
        let mut slot = self.online.lock();
        slot.get_or_insert_with(|| Arc::new((self.make_online)()))
            .clone()
    }

    fn offline_backend(&self) -> Arc<Off> {
        let mut slot = self.offline.lock();
        slot.get_or_insert_with(|| Arc::new((self.make_offline)()))
            .clone()
    }

    /// Load the backend, re-validate the selection, then geocode.
    async fn geocode_with<G: Geocoder>(
        &self,
        backend: &G,
        selected: BackendKind,
        point: MapPoint,
    ) -> LocatorResult<super::types::GeocodeMatch> {
        backend.load().await?;

        // The work mode or reachability may have flipped while the
        // backend was loading; never proceed with a stale selection.
        let current = self.selected_kind();
        if current != selected {
            warn!(?selected, ?current, "context changed during locator load");
            return Err(LocatorError::ContextChanged);
        }

        backend
            .reverse_geocode(point, &ReverseGeocodeParameters::for_storage())
            .await
    }
}

/// Backstop: credentials never outlive the selector, even when `close`
/// was not called.
impl<On, Off, Ctx> Drop for AddressLocator<On, Off, Ctx>
where
    On: Geocoder,
    Off: Geocoder,
    Ctx: LocatorContext,
{
    fn drop(&mut self) {
        self.clear_credentials();
    }
}
