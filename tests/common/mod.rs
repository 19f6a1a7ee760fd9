//! Shared test fixtures: an instrumented in-memory map widget.
#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use storemap::icon::IconResource;
use storemap::{
    Bounds, GeoPoint, MapWidget, MarkerHandle, MarkerSpec, NativeCluster, OverlayHandle,
    OverlaySpec, ScreenPoint,
};

/// A created marker as seen by the fake widget.
#[derive(Debug, Clone)]
pub struct FakeMarker {
    pub position: GeoPoint,
    pub title: String,
    pub icon: IconResource,
}

/// In-memory [`MapWidget`] that records every call for assertions.
pub struct FakeMap {
    next_handle: u64,
    pub markers: HashMap<MarkerHandle, FakeMarker>,
    pub overlays: HashMap<OverlayHandle, OverlaySpec>,
    pub attached: BTreeSet<MarkerHandle>,
    /// Total attach calls per handle, counting redundant ones.
    pub attach_calls: HashMap<MarkerHandle, usize>,
    /// Total detach calls per handle, counting redundant ones.
    pub detach_calls: HashMap<MarkerHandle, usize>,
    pub zoom: i32,
    pub viewport: Bounds,
    /// Pixels per degree used by the fake projection.
    pub px_per_deg: f64,
    /// What `native_clusters` reports. `None` simulates a widget without
    /// cluster introspection.
    pub clusters: Option<Vec<NativeCluster>>,
    pub pan_targets: Vec<GeoPoint>,
    pub center: GeoPoint,
}

impl FakeMap {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            markers: HashMap::new(),
            overlays: HashMap::new(),
            attached: BTreeSet::new(),
            attach_calls: HashMap::new(),
            detach_calls: HashMap::new(),
            zoom: 5,
            viewport: Bounds {
                min_lat: 37.3,
                max_lat: 37.5,
                min_lng: 127.0,
                max_lng: 127.3,
            },
            px_per_deg: 10_000.0,
            clusters: None,
            pan_targets: Vec::new(),
            center: GeoPoint::new(37.38, 127.12),
        }
    }

    pub fn attach_call_count(&self, handle: MarkerHandle) -> usize {
        self.attach_calls.get(&handle).copied().unwrap_or(0)
    }

    pub fn detach_call_count(&self, handle: MarkerHandle) -> usize {
        self.detach_calls.get(&handle).copied().unwrap_or(0)
    }

    /// Handles of all live markers, in creation order.
    pub fn marker_handles(&self) -> Vec<MarkerHandle> {
        let mut handles: Vec<_> = self.markers.keys().copied().collect();
        handles.sort_unstable();
        handles
    }
}

impl MapWidget for FakeMap {
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle {
        self.next_handle += 1;
        self.markers.insert(
            self.next_handle,
            FakeMarker {
                position: spec.position,
                title: spec.title,
                icon: spec.icon,
            },
        );
        self.next_handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        self.attached.remove(&handle);
    }

    fn update_marker(&mut self, handle: MarkerHandle, icon: IconResource, title: String) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.icon = icon;
            marker.title = title;
        }
    }

    fn attach_to_clusterer(&mut self, handle: MarkerHandle) {
        *self.attach_calls.entry(handle).or_insert(0) += 1;
        self.attached.insert(handle);
    }

    fn detach_from_clusterer(&mut self, handle: MarkerHandle) {
        *self.detach_calls.entry(handle).or_insert(0) += 1;
        self.attached.remove(&handle);
    }

    fn add_overlay(&mut self, spec: OverlaySpec) -> OverlayHandle {
        self.next_handle += 1;
        self.overlays.insert(self.next_handle, spec);
        self.next_handle
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        self.overlays.remove(&handle);
    }

    fn pan_to(&mut self, center: GeoPoint) {
        self.pan_targets.push(center);
        self.center = center;
    }

    fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
    }

    fn zoom_level(&self) -> i32 {
        self.zoom
    }

    fn set_zoom_level(&mut self, level: i32, _anchor: Option<GeoPoint>) {
        self.zoom = level;
    }

    fn viewport_bounds(&self) -> Bounds {
        self.viewport
    }

    fn project(&self, point: &GeoPoint) -> ScreenPoint {
        ScreenPoint {
            x: (point.lng - self.viewport.min_lng) * self.px_per_deg,
            y: (self.viewport.max_lat - point.lat) * self.px_per_deg,
        }
    }

    fn native_clusters(&self) -> Option<Vec<NativeCluster>> {
        self.clusters.clone()
    }
}

/// A merchant with coordinates, for terse test setup.
pub fn merchant(name: &str, business_type: &str, lat: f64, lng: f64) -> storemap::Merchant {
    storemap::Merchant::new(name, business_type, business_type, "성남대로 1")
        .with_coords(GeoPoint::new(lat, lng))
}
