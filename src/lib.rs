//! Field data collection support library.
//!
//! This library provides the non-UI building blocks for a mobile
//! field-data-collection application: a context-aware reverse geocoding
//! selector that switches between an online geocoding service and a
//! side-loaded offline locator, directory management for per-item offline
//! map storage, and the routing model behind the map view's "extras" menu.
//!
//! The three components are independent; nothing flows between them. They
//! are wired together by an application shell that owns the map view and
//! the shared [`context::AppContext`].

pub mod context;
pub mod extras;
pub mod geo;
pub mod locator;
pub mod offline_map;
