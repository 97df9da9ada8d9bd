//! Routing model for the map view's "extras" menu.
//!
//! The extras menu offers two entries, a layer list and a bookmarks list,
//! each opening its own panel. This module carries the routing state only;
//! panel construction is delegated to a host-supplied [`PanelFactory`] so
//! the same model drives any UI toolkit. Panels are created lazily, once,
//! and kept across dismissals, matching the behavior users expect from a
//! menu they reopen constantly in the field.

use tracing::debug;

/// An entry in the extras menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    /// Displays layer content.
    Layers,
    /// Displays bookmarks.
    Bookmarks,
}

impl Extra {
    /// Every extra, in menu order.
    pub const ALL: [Extra; 2] = [Extra::Layers, Extra::Bookmarks];

    /// Menu and panel title.
    pub fn title(&self) -> &'static str {
        match self {
            Extra::Layers => "Layers",
            Extra::Bookmarks => "Bookmarks",
        }
    }

    /// Panel subtitle, where the panel carries one.
    pub fn subtitle(&self) -> Option<&'static str> {
        match self {
            Extra::Layers => None,
            Extra::Bookmarks => Some("Select a bookmark"),
        }
    }
}

/// Host-supplied construction of the two extras panels.
pub trait PanelFactory {
    /// The host's panel representation.
    type Panel;

    /// Build the layer contents panel.
    fn make_layers_panel(&self) -> Self::Panel;

    /// Build the bookmarks panel.
    fn make_bookmarks_panel(&self) -> Self::Panel;
}

/// Routes extras menu selections to their panels.
///
/// Each panel is built on first open and cached for the router's
/// lifetime; dismissal hides the panel without discarding it. A disabled
/// router (map view disabled) ignores open requests.
pub struct ExtrasRouter<F: PanelFactory> {
    factory: F,
    enabled: bool,
    layers_panel: Option<F::Panel>,
    bookmarks_panel: Option<F::Panel>,
    active: Option<Extra>,
}

impl<F: PanelFactory> ExtrasRouter<F> {
    /// Create an enabled router with no panels built yet.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            enabled: true,
            layers_panel: None,
            bookmarks_panel: None,
            active: None,
        }
    }

    /// Enable or disable routing. Disabling does not dismiss an already
    /// open panel.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the router currently accepts open requests.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The currently presented extra, if any.
    pub fn active(&self) -> Option<Extra> {
        self.active
    }

    /// Open the panel for the given extra, building it on first use.
    ///
    /// Returns `None` when the router is disabled.
    pub fn open(&mut self, extra: Extra) -> Option<&F::Panel> {
        if !self.enabled {
            debug!(?extra, "extras menu disabled, ignoring");
            return None;
        }

        self.active = Some(extra);
        let panel = match extra {
            Extra::Layers => self
                .layers_panel
                .get_or_insert_with(|| self.factory.make_layers_panel()),
            Extra::Bookmarks => self
                .bookmarks_panel
                .get_or_insert_with(|| self.factory.make_bookmarks_panel()),
        };
        debug!(?extra, "presenting extras panel");
        Some(panel)
    }

    /// Dismiss the active panel, keeping its cached instance. Returns
    /// whether a panel was dismissed.
    pub fn dismiss(&mut self) -> bool {
        let dismissed = self.active.take();
        if let Some(extra) = dismissed {
            debug!(?extra, "dismissed extras panel");
        }
        dismissed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Factory that counts constructions; panels are their titles.
    struct CountingFactory {
        layers_built: Cell<usize>,
        bookmarks_built: Cell<usize>,
    }

    impl CountingFactory {
        fn new() -> Self {
            Self {
                layers_built: Cell::new(0),
                bookmarks_built: Cell::new(0),
            }
        }
    }

    impl PanelFactory for CountingFactory {
        type Panel = String;

        fn make_layers_panel(&self) -> String {
            self.layers_built.set(self.layers_built.get() + 1);
            Extra::Layers.title().to_string()
        }

        fn make_bookmarks_panel(&self) -> String {
            self.bookmarks_built.set(self.bookmarks_built.get() + 1);
            Extra::Bookmarks.title().to_string()
        }
    }

    #[test]
    fn test_menu_entries_and_titles() {
        assert_eq!(Extra::ALL, [Extra::Layers, Extra::Bookmarks]);
        assert_eq!(Extra::Layers.title(), "Layers");
        assert_eq!(Extra::Bookmarks.title(), "Bookmarks");
        assert_eq!(Extra::Layers.subtitle(), None);
        assert_eq!(Extra::Bookmarks.subtitle(), Some("Select a bookmark"));
    }

    #[test]
    fn test_open_builds_panel_lazily() {
        let mut router = ExtrasRouter::new(CountingFactory::new());
        assert_eq!(router.factory.layers_built.get(), 0);

        let panel = router.open(Extra::Layers).unwrap();
        assert_eq!(panel, "Layers");
        assert_eq!(router.factory.layers_built.get(), 1);
        assert_eq!(router.factory.bookmarks_built.get(), 0);
        assert_eq!(router.active(), Some(Extra::Layers));
    }

    #[test]
    fn test_reopen_reuses_cached_panel() {
        let mut router = ExtrasRouter::new(CountingFactory::new());

        router.open(Extra::Bookmarks);
        assert!(router.dismiss());
        router.open(Extra::Bookmarks);

        assert_eq!(router.factory.bookmarks_built.get(), 1);
    }

    #[test]
    fn test_switching_extras_keeps_both_panels() {
        let mut router = ExtrasRouter::new(CountingFactory::new());

        router.open(Extra::Layers);
        router.open(Extra::Bookmarks);
        router.open(Extra::Layers);

        assert_eq!(router.factory.layers_built.get(), 1);
        assert_eq!(router.factory.bookmarks_built.get(), 1);
        assert_eq!(router.active(), Some(Extra::Layers));
    }

    #[test]
    fn test_disabled_router_ignores_open() {
        let mut router = ExtrasRouter::new(CountingFactory::new());
        router.set_enabled(false);

        assert!(router.open(Extra::Layers).is_none());
        assert_eq!(router.active(), None);
        assert_eq!(router.factory.layers_built.get(), 0);
    }

    #[test]
    fn test_dismiss_without_active_panel() {
        let mut router = ExtrasRouter::new(CountingFactory::new());
        assert!(!router.dismiss());
    }
}
