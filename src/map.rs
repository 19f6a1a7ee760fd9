//! Map widget capability interface.
//!
//! The engine consumes the map through this trait instead of talking to a
//! rendering SDK. Handles are opaque u64 values minted by the widget. Events
//! flow the other way: the host observes widget events (clicks, zoom
//! changes, the clusterer's "clustered" recompute) and calls the matching
//! [`crate::MapViewEngine`] entry points.
//!
//! Zoom levels are Kakao-style: a smaller level is closer in, and zooming in
//! from a cluster click means `level - 1`.

use crate::icon::IconResource;
use crate::{Bounds, GeoPoint};

/// Opaque marker handle minted by the widget.
pub type MarkerHandle = u64;
/// Opaque overlay handle minted by the widget.
pub type OverlayHandle = u64;

/// A point in the widget's pixel projection space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Everything needed to create a point marker.
#[derive(Debug, Clone)]
pub struct MarkerSpec {
    pub position: GeoPoint,
    pub title: String,
    pub icon: IconResource,
}

/// Declarative click behavior attached to an overlay at creation time.
///
/// The widget executes the action itself; handler lifecycle is tied to the
/// overlay's existence, never to ad hoc timers.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayClick {
    /// Zoom in one level, anchored at the given position.
    ZoomInAt(GeoPoint),
}

/// Everything needed to create a DOM-content overlay at a geo position.
#[derive(Debug, Clone)]
pub struct OverlaySpec {
    pub position: GeoPoint,
    pub icon: IconResource,
    /// Anchor as (x, y) fractions of the icon size. (0.5, 0.5) centers the
    /// overlay on the position; (0.5, 1.0) hangs it above like a pin.
    pub anchor: (f64, f64),
    pub z_index: i32,
    pub on_click: Option<OverlayClick>,
}

/// One cluster as reported by the widget's native grid clusterer.
#[derive(Debug, Clone)]
pub struct NativeCluster {
    /// Handles of the member markers.
    pub markers: Vec<MarkerHandle>,
    /// Bounding box of the cluster as reported by the widget.
    pub bounds: Bounds,
}

/// Capability interface over the third-party map widget.
///
/// All operations are synchronous from the caller's perspective and must be
/// invoked on the UI thread. Cluster membership is *not* synchronous with
/// marker changes: after a visibility change the widget recomputes clusters
/// asynchronously and fires a "clustered" event, which the host forwards to
/// the engine.
pub trait MapWidget {
    /// Create a marker. The marker is not clustered until attached.
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle;

    /// Destroy a marker. Detaches it implicitly.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Swap a marker's icon and title in place.
    fn update_marker(&mut self, handle: MarkerHandle, icon: IconResource, title: String);

    /// Hand a marker to the native clusterer (makes it part of the base
    /// layer). Must be idempotent.
    fn attach_to_clusterer(&mut self, handle: MarkerHandle);

    /// Take a marker out of the native clusterer (hides it from the base
    /// layer). Must be idempotent.
    fn detach_from_clusterer(&mut self, handle: MarkerHandle);

    /// Create a geo-positioned overlay.
    fn add_overlay(&mut self, spec: OverlaySpec) -> OverlayHandle;

    /// Destroy an overlay, releasing its click handler.
    fn remove_overlay(&mut self, handle: OverlayHandle);

    /// Smoothly pan the camera.
    fn pan_to(&mut self, center: GeoPoint);

    /// Jump the camera without animation.
    fn set_center(&mut self, center: GeoPoint);

    fn zoom_level(&self) -> i32;

    /// Set the zoom level, optionally keeping a geo anchor fixed on screen.
    fn set_zoom_level(&mut self, level: i32, anchor: Option<GeoPoint>);

    /// Current viewport in geo coordinates.
    fn viewport_bounds(&self) -> Bounds;

    /// Project a geo coordinate into pixel space at the current zoom.
    fn project(&self, point: &GeoPoint) -> ScreenPoint;

    /// Current native cluster membership, if the widget exposes it.
    ///
    /// `None` means the introspection API is unavailable and the caller
    /// falls back to manual grid bucketing over the viewport.
    fn native_clusters(&self) -> Option<Vec<NativeCluster>>;
}
