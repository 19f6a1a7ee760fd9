//! # Storemap
//!
//! Map-engine core for a merchant storefront locator.
//!
//! This library owns the logic that decides *what* to draw on the map and
//! *when* to redraw it:
//! - Snapping nearby merchant coordinates into stable location groups
//! - Choosing and rendering composite marker icons (single / badge-counted /
//!   multi-category)
//! - Synchronizing ring overlays with the map widget's native clustering
//! - Tracking the single highlighted "selected" marker
//! - Reconciling all of the above with filter and search state
//!
//! The map widget itself and the remote merchant source are consumed through
//! capability traits ([`map::MapWidget`], [`repository::MerchantSource`]);
//! the engine never talks to a rendering backend directly.
//!
//! ## Quick start
//!
//! ```rust
//! use storemap::{group_merchants, Merchant, GeoPoint, MapConfig};
//!
//! let merchants = vec![
//!     Merchant::new("A", "치킨", "음식점", "성남대로 1")
//!         .with_coords(GeoPoint::new(37.380000, 127.120000)),
//!     Merchant::new("B", "분식", "음식점", "성남대로 1")
//!         .with_coords(GeoPoint::new(37.380002, 127.120002)),
//! ];
//!
//! let groups = group_merchants(&merchants, MapConfig::default().snap_radius_m);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].members.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, StoreMapError};

// Geographic utilities (distance, bounds, location keys)
pub mod geo_utils;

// Location grouping (snap-radius greedy grouping)
pub mod grouping;
pub use grouping::group_merchants;

// Category style table (colors, glyph paths, brand color)
pub mod categories;
pub use categories::{CategoryStyle, BRAND_COLOR};

// Marker icon rendering
pub mod icon;
pub use icon::{IconResource, MarkerIconFactory, MarkerRendering};

// Cluster overlay synchronization
pub mod cluster;
pub use cluster::ClusterOverlayRenderer;

// Selected-marker highlight state machine
pub mod selection;
pub use selection::{Selection, SelectionHighlighter};

// Map widget capability interface
pub mod map;
pub use map::{
    MapWidget, MarkerHandle, MarkerSpec, NativeCluster, OverlayClick, OverlayHandle, OverlaySpec,
    ScreenPoint,
};

// Merchant source + caching store with subscribe/notify
pub mod repository;
pub use repository::{
    DataSource, InMemorySource, LoadStatus, MerchantSource, MerchantStore, RequestToken,
};

// View synchronization engine
pub mod engine;
pub use engine::{EngineStats, MapViewEngine, MarkerEntity, MarkerStore, ViewMode};

// Synthetic merchant datasets for tests and benchmarks
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that the coordinate is finite and within valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }
}

/// Geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Compute bounds covering a set of points.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Midpoint of the bounding box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check whether a point lies inside the box (inclusive).
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lng >= self.min_lng
            && p.lng <= self.max_lng
    }

    /// Latitude span in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// An immutable merchant record, as produced by the merchant source.
///
/// `business_type` is the fixed top-level category used for filter chips and
/// marker coloring; `category` is the free-text original category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub name: String,
    pub category: String,
    pub business_type: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_detail: Option<String>,
    /// Missing coordinates exclude the merchant from grouping, silently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_url: Option<String>,
}

impl Merchant {
    /// Create a merchant without coordinates or external links.
    pub fn new(name: &str, category: &str, business_type: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            business_type: business_type.to_string(),
            address: address.to_string(),
            address_detail: None,
            coords: None,
            place_id: None,
            place_url: None,
        }
    }

    /// Set the coordinate.
    pub fn with_coords(mut self, coords: GeoPoint) -> Self {
        self.coords = Some(coords);
        self
    }

    /// Set the external place identifier and detail-page URL.
    pub fn with_place(mut self, place_id: &str, place_url: &str) -> Self {
        self.place_id = Some(place_id.to_string());
        self.place_url = Some(place_url.to_string());
        self
    }

    /// Stable identity used to match a merchant across result sets.
    ///
    /// Prefers the external place identifier; falls back to name + address.
    pub fn identity(&self) -> String {
        match &self.place_id {
            Some(id) => id.clone(),
            None => format!("{}|{}", self.name, self.address),
        }
    }
}

/// A set of merchants snapped together because their coordinates lie within
/// the snap radius of the group centroid at insertion time.
///
/// The centroid is the arithmetic mean of all member coordinates and drifts
/// as members join; the key is the stringified final centroid and doubles as
/// marker identity across rebuilds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationGroup {
    /// `"{lat},{lng}"` of the final centroid.
    pub key: String,
    pub centroid: GeoPoint,
    pub members: Vec<Merchant>,
}

/// Engine configuration.
///
/// Defaults mirror the production deployment: 5 m snap radius, a 60 px
/// clustering grid, and Kakao-style zoom levels where a *smaller* level is
/// closer in and clustering is active at `min_cluster_level` and above.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Maximum distance in meters between a merchant and a group centroid
    /// for the merchant to join the group. Default: 5.0
    pub snap_radius_m: f64,

    /// Pixel grid size shared with the widget's native clusterer.
    /// Default: 60.0
    pub cluster_grid_px: f64,

    /// Zoom level below which clustering is disabled and all cluster
    /// overlays are torn down. Default: 4
    pub min_cluster_level: i32,

    /// Initial map center. Default: 37.38, 127.12
    pub initial_center: GeoPoint,

    /// Initial zoom level. Default: 5
    pub initial_level: i32,

    /// Camera target when a search is applied. Default: 37.42, 127.13
    pub search_center: GeoPoint,

    /// Zoom level when a search is applied. Default: 6
    pub search_level: i32,

    /// Fraction of the viewport height reserved for the details panel;
    /// selecting a marker pans it into the upper third accordingly.
    /// Default: 1/3
    pub panel_fraction: f64,

    /// Maximum number of simultaneously selected filter categories.
    /// Default: 3
    pub max_filters: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            snap_radius_m: 5.0,
            cluster_grid_px: 60.0,
            min_cluster_level: 4,
            initial_center: GeoPoint::new(37.38, 127.12),
            initial_level: 5,
            search_center: GeoPoint::new(37.42, 127.13),
            search_level: 6,
            panel_fraction: 1.0 / 3.0,
            max_filters: 3,
        }
    }
}
