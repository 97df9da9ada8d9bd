//! Geographic value types.
//!
//! A minimal point type is all the geocoding components need; geometry
//! math, projections, and spatial indexing live in the mapping SDK, not
//! here.

/// Well-known ID for the WGS84 geographic coordinate system.
pub const WGS84_WKID: u32 = 4326;

/// A point on the map, in the coordinate system identified by `wkid`.
///
/// # Example
///
/// ```
/// use data_collection::geo::MapPoint;
///
/// let point = MapPoint::new(-117.195, 34.057);
/// assert_eq!(point.wkid, data_collection::geo::WGS84_WKID);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    /// X coordinate (longitude in geographic systems).
    pub x: f64,

    /// Y coordinate (latitude in geographic systems).
    pub y: f64,

    /// Well-known ID of the spatial reference.
    pub wkid: u32,
}

impl MapPoint {
    /// Create a point in WGS84.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            wkid: WGS84_WKID,
        }
    }

    /// Create a point in an arbitrary spatial reference.
    pub fn with_wkid(x: f64, y: f64, wkid: u32) -> Self {
        Self { x, y, wkid }
    }
}
