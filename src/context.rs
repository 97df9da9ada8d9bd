//! Application context signals consumed by the address locator.
//!
//! The work mode and reachability signals are owned by the application
//! shell; the locator only reads them. The [`LocatorContext`] trait is the
//! seam that lets tests drive backend selection without a real network
//! monitor behind it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Whether the app currently intends to operate against live network
/// services or against cached/local data only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMode {
    /// Operate against live network services.
    Online,
    /// Operate against cached/local data only.
    Offline,
}

/// Read access to the app-global signals that drive backend selection.
pub trait LocatorContext: Send + Sync {
    /// The current work mode.
    fn work_mode(&self) -> WorkMode;

    /// Whether the device currently has connectivity suitable for
    /// service calls.
    fn is_reachable(&self) -> bool;
}

/// Shared, mutable application context.
///
/// The shell updates this as the user toggles work mode and as the
/// platform reachability monitor fires; the locator reads it at call
/// time and again after each backend load.
#[derive(Debug)]
pub struct AppContext {
    work_mode: RwLock<WorkMode>,
    reachable: AtomicBool,
}

impl AppContext {
    /// Create a context with the given initial signals.
    pub fn new(work_mode: WorkMode, reachable: bool) -> Self {
        Self {
            work_mode: RwLock::new(work_mode),
            reachable: AtomicBool::new(reachable),
        }
    }

    /// Update the work mode.
    pub fn set_work_mode(&self, work_mode: WorkMode) {
        *self.work_mode.write() = work_mode;
    }

    /// Update the reachability signal.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(WorkMode::Online, true)
    }
}

impl LocatorContext for AppContext {
    fn work_mode(&self) -> WorkMode {
        *self.work_mode.read()
    }

    fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}

/// Shared contexts are read through the same trait.
impl<T: LocatorContext + ?Sized> LocatorContext for Arc<T> {
    fn work_mode(&self) -> WorkMode {
        (**self).work_mode()
    }

    fn is_reachable(&self) -> bool {
        (**self).is_reachable()
    }
}
